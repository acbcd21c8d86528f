// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kakei::advice::build_prompt;
use kakei::models::{JournalEntry, MajorCategory, Transaction};

fn tx(date: &str, raw: &str, category: MajorCategory) -> Transaction {
    Transaction::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        "entry",
        raw,
        "bank",
        category,
        None,
    )
}

#[test]
fn prompt_contains_totals_categories_and_split() {
    let ledger = vec![
        tx("2024-05-02", "300000", MajorCategory::Unclassified),
        tx("2024-05-01", "-500", MajorCategory::Food),
        tx("2024-05-10", "-80000", MajorCategory::Housing),
    ];
    let prompt = build_prompt(&ledger, &[], 2024, 5);

    assert!(prompt.contains("2024-05"));
    assert!(prompt.contains("Income: ¥300,000"));
    assert!(prompt.contains("Expense: ¥80,500"));
    assert!(prompt.contains("Balance: +¥219,500"));
    assert!(prompt.contains("- housing: ¥80,000"));
    assert!(prompt.contains("- food: ¥500"));
    assert!(prompt.contains("Fixed costs: ¥80,000"));
    assert!(prompt.contains("Variable costs: ¥500"));
}

#[test]
fn journal_comment_is_included_only_for_the_exact_month() {
    let ledger = vec![tx("2024-05-01", "-500", MajorCategory::Food)];
    let journal = vec![
        JournalEntry {
            month: "2024-04".into(),
            comment: "ate out too much".into(),
            score: 4,
        },
        JournalEntry {
            month: "2024-05".into(),
            comment: "cooked at home".into(),
            score: 8,
        },
    ];

    let prompt = build_prompt(&ledger, &journal, 2024, 5);
    assert!(prompt.contains("cooked at home"));
    assert!(prompt.contains("8/10"));
    assert!(!prompt.contains("ate out too much"));

    let prompt = build_prompt(&ledger, &journal, 2024, 3);
    assert!(!prompt.contains("cooked at home"));
}

#[test]
fn empty_inputs_omit_sections_instead_of_failing() {
    let prompt = build_prompt(&[], &[], 2024, 5);
    assert!(prompt.contains("Income: ¥0"));
    assert!(!prompt.contains("Spending by category"));
    assert!(!prompt.contains("Fixed costs"));
    assert!(!prompt.contains("satisfaction"));
}
