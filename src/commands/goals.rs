// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;
use rust_decimal::Decimal;

use crate::currency::try_normalize_amount;
use crate::models::{AssetSnapshot, Goal};
use crate::project::{self, Outcome, ProjectError, clamp_horizon};
use crate::store::{CollectionStore, load_or_empty, load_records, save_records};
use crate::utils::{
    add_months, fmt_signed_yen, fmt_yen, maybe_print_json, months_between, parse_date,
    pretty_table,
};

pub fn handle(store: &dyn CollectionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("forecast", sub)) => forecast(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let target_amount = try_normalize_amount(sub.get_one::<String>("target").unwrap())
        .map_err(|e| anyhow!(e))?;
    let target_date = parse_date(sub.get_one::<String>("date").unwrap())?;

    let mut goals: Vec<Goal> = load_records(store)?;
    goals.retain(|g| g.name != name);
    goals.push(Goal {
        name: name.clone(),
        target_amount,
        target_date,
    });
    save_records(store, &goals)?;
    println!(
        "Goal '{}' set: {} by {}",
        name,
        fmt_yen(target_amount),
        target_date
    );
    Ok(())
}

fn list(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let goals: Vec<Goal> = load_or_empty(store);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        let rows = goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    fmt_yen(g.target_amount),
                    g.target_date.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Target", "By"], rows));
    }
    Ok(())
}

fn forecast(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let goals: Vec<Goal> = load_or_empty(store);
    let snapshots: Vec<AssetSnapshot> = load_or_empty(store);
    let history: Vec<(String, Decimal)> = snapshots
        .iter()
        .map(|s| (s.month.clone(), s.total()))
        .collect();

    let selected: Vec<&Goal> = match sub.get_one::<String>("name") {
        Some(name) => {
            let g = goals
                .iter()
                .find(|g| g.name == *name)
                .ok_or_else(|| anyhow!("Goal '{}' not found", name))?;
            vec![g]
        }
        None => goals.iter().collect(),
    };
    if selected.is_empty() {
        println!("No goals set. Use 'kakei goal set' first.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    for goal in selected {
        let horizon = clamp_horizon(months_between(today, goal.target_date));
        match project::project(&history, goal.target_amount, horizon) {
            Err(ProjectError::InsufficientHistory) => {
                println!(
                    "{}: insufficient data, record at least two monthly asset snapshots",
                    goal.name
                );
            }
            Ok(proj) => {
                if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &proj)? {
                    continue;
                }
                let last = history.last().expect("projection requires history");
                println!(
                    "{}: target {} by {}, currently {} (pace {}/month)",
                    goal.name,
                    fmt_yen(goal.target_amount),
                    goal.target_date,
                    fmt_yen(last.1),
                    fmt_signed_yen(proj.monthly_delta)
                );
                match proj.outcome {
                    Outcome::AlreadyAchieved => println!("  Goal already achieved."),
                    Outcome::TargetUnreachable => {
                        println!("  Assets are not growing at the current pace; the target is unreachable as is.")
                    }
                    Outcome::Eta { months } => {
                        let eta = add_months(&last.0, months as i32)
                            .unwrap_or_else(|| last.0.clone());
                        println!("  On pace to reach the target in ~{} months ({})", months, eta);
                    }
                }
                let rows = proj
                    .path
                    .iter()
                    .map(|p| vec![p.month.clone(), fmt_yen(p.value)])
                    .collect();
                println!("{}", pretty_table(&["Month", "Projected total"], rows));
            }
        }
    }
    Ok(())
}
