// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Write;

use crate::aggregate::{self, Scope};
use crate::models::{JournalEntry, Transaction};
use crate::utils::{fmt_signed_yen, fmt_yen, month_key};

/// Assemble the fixed-structure analysis prompt for one month: totals,
/// per-category spend against the yearly monthly average, the
/// fixed/variable split, and the user's own journal comment when one
/// exists for that exact month key. Pure text assembly; empty inputs
/// simply omit their sections.
pub fn build_prompt(
    txs: &[Transaction],
    journal: &[JournalEntry],
    year: i32,
    month: u32,
) -> String {
    let scope = Scope::month(year, month);
    let income = aggregate::sum_income(txs, scope);
    let expense = aggregate::sum_expense(txs, scope);

    let mut p = format!(
        "You are a professional financial planner. Analyze the household \
         data below for {}-{:02} and give concrete, encouraging advice.\n\n\
         Income: {}  Expense: {}  Balance: {}\n",
        year,
        month,
        fmt_yen(income),
        fmt_yen(expense),
        fmt_signed_yen(income - expense),
    );

    let breakdown = aggregate::category_breakdown(txs, scope);
    if !breakdown.is_empty() {
        p.push_str("\nSpending by category:\n");
        for (cat, spent) in &breakdown {
            let avg = aggregate::month_average(txs, *cat, year);
            let diff = *spent - avg;
            let _ = writeln!(
                p,
                "- {}: {} (yearly monthly average {}, delta {})",
                cat.as_str(),
                fmt_yen(*spent),
                fmt_yen(avg),
                fmt_signed_yen(diff),
            );
        }

        let (fixed, variable) = aggregate::fixed_variable_split(txs, scope);
        let _ = writeln!(
            p,
            "\nFixed costs: {}  Variable costs: {}",
            fmt_yen(fixed),
            fmt_yen(variable),
        );
    }

    let key = month_key(year, month);
    if let Some(entry) = journal.iter().rev().find(|j| j.month == key) {
        let _ = writeln!(
            p,
            "\nThe user's own review (satisfaction {}/10): {}",
            entry.score, entry.comment,
        );
    }

    p.push_str(
        "\nAnswer in 300-400 words of numbered plain text:\n\
         1. Overall assessment of the month\n\
         2. What went well\n\
         3. What to improve, with amounts\n\
         4. Actions for next month",
    );
    p
}
