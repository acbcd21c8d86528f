// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{self, Scope};
use crate::currency::try_normalize_amount;
use crate::models::{CategoryBudget, MajorCategory, Transaction};
use crate::store::{CollectionStore, load_or_empty, load_records, save_records};
use crate::utils::{fmt_yen, maybe_print_json, pretty_table};

pub fn handle(store: &dyn CollectionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("report", sub)) => report(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let category = MajorCategory::parse(sub.get_one::<String>("category").unwrap());
    let amount = try_normalize_amount(sub.get_one::<String>("amount").unwrap())
        .map_err(|e| anyhow!(e))?;
    if amount < Decimal::ZERO {
        return Err(anyhow!("Budget must be zero or positive"));
    }

    let mut budgets: Vec<CategoryBudget> = load_records(store)?;
    budgets.retain(|b| b.category != category);
    if amount > Decimal::ZERO {
        budgets.push(CategoryBudget { category, amount });
    }
    // A zero budget means "unset" and is simply not persisted.
    save_records(store, &budgets)?;
    if amount.is_zero() {
        println!("Budget cleared for {}", category.as_str());
    } else {
        println!("Budget set for {} = {}", category.as_str(), fmt_yen(amount));
    }
    Ok(())
}

fn list(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let budgets: Vec<CategoryBudget> = load_or_empty(store);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        let rows = budgets
            .iter()
            .map(|b| vec![b.category.as_str().to_string(), fmt_yen(b.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Monthly budget"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct UtilizationRow {
    category: String,
    budget: Decimal,
    spent: Decimal,
    utilization_pct: Decimal,
    remainder: Decimal,
}

fn report(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let year = *sub.get_one::<i32>("year").unwrap_or(&today.year());
    let month = sub.get_one::<u32>("month").copied().unwrap_or(today.month());
    let scope = Scope::month(year, month);

    let budgets: Vec<CategoryBudget> = load_or_empty(store);
    let ledger: Vec<Transaction> = load_or_empty(store);
    let breakdown = aggregate::category_breakdown(&ledger, scope);

    let mut data = Vec::new();
    for b in &budgets {
        let spent = breakdown
            .iter()
            .find(|(c, _)| *c == b.category)
            .map(|(_, v)| *v)
            .unwrap_or(Decimal::ZERO);
        let util = aggregate::budget_utilization(spent, b.amount);
        data.push(UtilizationRow {
            category: b.category.as_str().to_string(),
            budget: b.amount,
            spent,
            utilization_pct: util.ratio * Decimal::from(100),
            remainder: util.remainder,
        });
    }

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                let remaining = if r.remainder < Decimal::ZERO {
                    format!("over by {}", fmt_yen(-r.remainder))
                } else {
                    fmt_yen(r.remainder)
                };
                vec![
                    r.category.clone(),
                    fmt_yen(r.spent),
                    fmt_yen(r.budget),
                    format!("{:.0}%", r.utilization_pct),
                    remaining,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Spent", "Budget", "Used", "Remaining"],
                rows,
            )
        );
    }
    Ok(())
}
