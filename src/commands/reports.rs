// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{self, Scope, YearOverYear};
use crate::models::{CategoryBudget, Transaction};
use crate::store::{CollectionStore, load_or_empty};
use crate::utils::{fmt_signed_yen, fmt_yen, maybe_print_json, pretty_table};

pub fn handle(store: &dyn CollectionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("year", sub)) => year_summary(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn scope_of(sub: &clap::ArgMatches) -> (i32, u32) {
    let today = Local::now().date_naive();
    (
        *sub.get_one::<i32>("year").unwrap_or(&today.year()),
        sub.get_one::<u32>("month").copied().unwrap_or(today.month()),
    )
}

fn yoy_text(yoy: YearOverYear) -> String {
    match yoy {
        YearOverYear::NoPriorData => "no prior-year data".to_string(),
        YearOverYear::Delta(pct) => {
            let sign = if pct > Decimal::ZERO { "+" } else { "" };
            format!("{}{:.1}% vs prior year", sign, pct)
        }
    }
}

#[derive(Serialize)]
struct Summary {
    year: i32,
    month: u32,
    income: Decimal,
    expense: Decimal,
    balance: Decimal,
    income_yoy: YearOverYear,
    expense_yoy: YearOverYear,
    fixed: Decimal,
    variable: Decimal,
    budget_total: Decimal,
    budget_used_pct: Decimal,
    budget_remainder: Decimal,
}

fn summary(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = scope_of(sub);
    let scope = Scope::month(year, month);
    let prior = Scope::month(year - 1, month);

    let ledger: Vec<Transaction> = load_or_empty(store);
    let budgets: Vec<CategoryBudget> = load_or_empty(store);

    let income = aggregate::sum_income(&ledger, scope);
    let expense = aggregate::sum_expense(&ledger, scope);
    let (fixed, variable) = aggregate::fixed_variable_split(&ledger, scope);
    let budget_total: Decimal = budgets.iter().map(|b| b.amount).sum();
    let util = aggregate::budget_utilization(expense, budget_total);

    let data = Summary {
        year,
        month,
        income,
        expense,
        balance: income - expense,
        income_yoy: aggregate::year_over_year(income, aggregate::sum_income(&ledger, prior)),
        expense_yoy: aggregate::year_over_year(expense, aggregate::sum_expense(&ledger, prior)),
        fixed,
        variable,
        budget_total,
        budget_used_pct: util.ratio * Decimal::from(100),
        budget_remainder: util.remainder,
    };

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let mut rows = vec![
            vec![
                "Income".to_string(),
                fmt_yen(data.income),
                yoy_text(data.income_yoy),
            ],
            vec![
                "Expense".to_string(),
                fmt_yen(data.expense),
                yoy_text(data.expense_yoy),
            ],
            vec![
                "Balance".to_string(),
                fmt_signed_yen(data.balance),
                String::new(),
            ],
            vec![
                "Fixed / variable".to_string(),
                format!("{} / {}", fmt_yen(data.fixed), fmt_yen(data.variable)),
                String::new(),
            ],
        ];
        if data.budget_total > Decimal::ZERO {
            rows.push(vec![
                "Budget".to_string(),
                format!("{:.0}% of {}", data.budget_used_pct, fmt_yen(data.budget_total)),
                if data.budget_remainder < Decimal::ZERO {
                    format!("over by {}", fmt_yen(-data.budget_remainder))
                } else {
                    format!("{} remaining", fmt_yen(data.budget_remainder))
                },
            ]);
        }
        println!("Summary for {}-{:02}", year, month);
        println!("{}", pretty_table(&["", "Value", "Note"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryRow {
    category: String,
    spent: Decimal,
    monthly_average: Decimal,
    delta: Decimal,
    prior_year_same_month: Decimal,
}

fn categories(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = scope_of(sub);
    let scope = Scope::month(year, month);
    let prior = Scope::month(year - 1, month);
    let ledger: Vec<Transaction> = load_or_empty(store);
    let prior_breakdown = aggregate::category_breakdown(&ledger, prior);

    let data: Vec<CategoryRow> = aggregate::category_breakdown(&ledger, scope)
        .into_iter()
        .map(|(cat, spent)| {
            let avg = aggregate::month_average(&ledger, cat, year);
            CategoryRow {
                category: cat.as_str().to_string(),
                spent,
                monthly_average: avg,
                delta: spent - avg,
                prior_year_same_month: prior_breakdown
                    .iter()
                    .find(|(c, _)| *c == cat)
                    .map(|(_, v)| *v)
                    .unwrap_or(Decimal::ZERO),
            }
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_yen(r.spent),
                    fmt_yen(r.monthly_average),
                    fmt_signed_yen(r.delta),
                    fmt_yen(r.prior_year_same_month),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "This month", "Monthly avg", "Delta", "Last year"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct YearRow {
    category: String,
    total: Decimal,
    monthly_average: Decimal,
    share_pct: Decimal,
}

fn year_summary(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let year = *sub.get_one::<i32>("year").unwrap_or(&today.year());
    let scope = Scope::year(year);
    let ledger: Vec<Transaction> = load_or_empty(store);

    let breakdown = aggregate::category_breakdown(&ledger, scope);
    let total_expense: Decimal = breakdown.iter().map(|(_, v)| *v).sum();
    let months = Decimal::from(aggregate::active_months(&ledger, year));

    let data: Vec<YearRow> = breakdown
        .into_iter()
        .map(|(cat, total)| YearRow {
            category: cat.as_str().to_string(),
            total,
            monthly_average: total / months,
            share_pct: if total_expense.is_zero() {
                Decimal::ZERO
            } else {
                total / total_expense * Decimal::from(100)
            },
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_yen(r.total),
                    fmt_yen(r.monthly_average),
                    format!("{:.1}%", r.share_pct),
                ]
            })
            .collect();
        println!("Annual category summary for {}", year);
        println!(
            "{}",
            pretty_table(&["Category", "Year total", "Monthly avg", "Share"], rows)
        );
    }
    Ok(())
}
