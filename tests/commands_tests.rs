// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kakei::cli;
use kakei::commands;
use kakei::models::{AssetSnapshot, CategoryBudget, Goal, JournalEntry, Transaction};
use kakei::store::{MemStore, load_records};
use rust_decimal::Decimal;

fn run(store: &MemStore, argv: &[&str]) {
    let mut args = vec!["kakei"];
    args.extend_from_slice(argv);
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(store, sub).unwrap(),
        Some(("budget", sub)) => commands::budgets::handle(store, sub).unwrap(),
        Some(("asset", sub)) => commands::assets::handle(store, sub).unwrap(),
        Some(("goal", sub)) => commands::goals::handle(store, sub).unwrap(),
        Some(("journal", sub)) => commands::journal::handle(store, sub).unwrap(),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn saving_an_asset_month_twice_keeps_one_row_with_the_last_values() {
    let store = MemStore::new();
    run(&store, &["asset", "set", "2024-06", "--cash", "100000"]);
    run(
        &store,
        &["asset", "set", "2024-06", "--cash", "250000", "--securities", "50000"],
    );

    let snapshots: Vec<AssetSnapshot> = load_records(&store).unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].month, "2024-06");
    assert_eq!(snapshots[0].cash, Decimal::from(250000));
    assert_eq!(snapshots[0].total(), Decimal::from(300000));
}

#[test]
fn asset_collection_stays_sorted_by_month() {
    let store = MemStore::new();
    run(&store, &["asset", "set", "2024-06", "--cash", "1"]);
    run(&store, &["asset", "set", "2024-04", "--cash", "1"]);
    run(&store, &["asset", "set", "2024-05", "--cash", "1"]);

    let snapshots: Vec<AssetSnapshot> = load_records(&store).unwrap();
    let months: Vec<&str> = snapshots.iter().map(|s| s.month.as_str()).collect();
    assert_eq!(months, vec!["2024-04", "2024-05", "2024-06"]);
}

#[test]
fn zero_budget_means_unset_and_is_not_persisted() {
    let store = MemStore::new();
    run(&store, &["budget", "set", "food", "40000"]);
    run(&store, &["budget", "set", "housing", "80000"]);
    run(&store, &["budget", "set", "food", "0"]);

    let budgets: Vec<CategoryBudget> = load_records(&store).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].category.as_str(), "housing");
}

#[test]
fn goal_with_same_name_is_replaced() {
    let store = MemStore::new();
    run(
        &store,
        &["goal", "set", "retirement", "--target", "10000000", "--date", "2035-01-01"],
    );
    run(
        &store,
        &["goal", "set", "retirement", "--target", "20000000", "--date", "2040-01-01"],
    );

    let goals: Vec<Goal> = load_records(&store).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].target_amount, Decimal::from(20000000));
}

#[test]
fn journal_entry_for_a_month_is_replaced_not_duplicated() {
    let store = MemStore::new();
    run(&store, &["journal", "add", "2024-05", "--score", "4", "--comment", "ate out"]);
    run(&store, &["journal", "add", "2024-05", "--score", "8", "--comment", "cooked"]);

    let entries: Vec<JournalEntry> = load_records(&store).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].score, 8);
    assert_eq!(entries[0].comment, "cooked");
}

#[test]
fn manual_entry_lands_in_the_ledger_with_manual_account() {
    let store = MemStore::new();
    run(
        &store,
        &[
            "tx", "add", "--date", "2024-05-01", "--description", "Groceries",
            "--amount", "3200", "--category", "food",
        ],
    );
    run(
        &store,
        &[
            "tx", "add", "--date", "2024-05-25", "--description", "Salary",
            "--amount", "300000", "--income", "--category", "unclassified",
        ],
    );

    let ledger: Vec<Transaction> = load_records(&store).unwrap();
    assert_eq!(ledger.len(), 2);
    // Ledger is kept date-descending.
    assert_eq!(ledger[0].description, "Salary");
    assert_eq!(ledger[0].amount, Decimal::from(300000));
    assert_eq!(ledger[1].amount, Decimal::from(-3200));
    assert!(ledger.iter().all(|t| t.account == "manual"));
}
