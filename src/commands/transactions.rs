// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Local};
use rust_decimal::Decimal;

use crate::currency::try_normalize_amount;
use crate::merge::merge;
use crate::models::{MajorCategory, Transaction};
use crate::store::{CollectionStore, load_or_empty, load_records, save_records};
use crate::utils::{fmt_yen, maybe_print_json, parse_date, pretty_table};

pub fn handle(store: &dyn CollectionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let magnitude = try_normalize_amount(sub.get_one::<String>("amount").unwrap())
        .map_err(|e| anyhow!(e))?;
    if magnitude <= Decimal::ZERO {
        return Err(anyhow!("Amount must be positive; use --income for income"));
    }
    let signed = if sub.get_flag("income") {
        magnitude
    } else {
        -magnitude
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| MajorCategory::parse(s))
        .unwrap_or(MajorCategory::Food);
    let minor = sub.get_one::<String>("minor").cloned();

    let tx = Transaction::new(date, description, signed.to_string(), "manual", category, minor);
    let ledger = merge(load_records(store)?, vec![tx]);
    save_records(store, &ledger)?;
    println!(
        "Recorded {} on {} for '{}' ({} total)",
        fmt_yen(signed),
        date,
        description,
        ledger.len()
    );
    Ok(())
}

fn list(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub
        .get_one::<i32>("year")
        .unwrap_or(&Local::now().date_naive().year());
    let month = sub.get_one::<u32>("month").copied();
    let category = sub.get_one::<String>("category").map(|s| MajorCategory::parse(s));
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let ledger: Vec<Transaction> = load_or_empty(store);
    let data: Vec<&Transaction> = ledger
        .iter()
        .filter(|t| t.year == year)
        .filter(|t| month.is_none_or(|m| t.month == m))
        .filter(|t| category.is_none_or(|c| t.major_category == c))
        .take(limit)
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    fmt_yen(t.amount),
                    t.major_category.as_str().to_string(),
                    t.cost_type.as_str().to_string(),
                    t.account.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Amount", "Category", "Cost type", "Account"],
                rows,
            )
        );
    }
    Ok(())
}
