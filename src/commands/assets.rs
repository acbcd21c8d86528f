// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::currency::try_normalize_amount;
use crate::models::AssetSnapshot;
use crate::store::{CollectionStore, load_or_empty, load_records, save_records};
use crate::utils::{fmt_signed_yen, fmt_yen, maybe_print_json, parse_month, pretty_table};

pub fn handle(store: &dyn CollectionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn amount_arg(sub: &clap::ArgMatches, name: &str) -> Result<rust_decimal::Decimal> {
    try_normalize_amount(sub.get_one::<String>(name).unwrap()).map_err(|e| anyhow!(e))
}

fn set(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let snapshot = AssetSnapshot {
        month: month.clone(),
        cash: amount_arg(sub, "cash")?,
        securities: amount_arg(sub, "securities")?,
        retirement: amount_arg(sub, "retirement")?,
        other: amount_arg(sub, "other")?,
    };

    let total = snapshot.total();

    // Delete-then-insert per month key, then re-sort the whole collection.
    let mut snapshots: Vec<AssetSnapshot> = load_records(store)?;
    snapshots.retain(|s| s.month != month);
    snapshots.push(snapshot);
    snapshots.sort_by(|a, b| a.month.cmp(&b.month));
    save_records(store, &snapshots)?;

    println!("Saved {}: total {}", month, fmt_yen(total));
    Ok(())
}

fn list(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let snapshots: Vec<AssetSnapshot> = load_or_empty(store);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snapshots)? {
        let rows = snapshots
            .iter()
            .map(|s| {
                vec![
                    s.month.clone(),
                    fmt_yen(s.cash),
                    fmt_yen(s.securities),
                    fmt_yen(s.retirement),
                    fmt_yen(s.other),
                    fmt_yen(s.total()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Cash", "Securities", "Retirement", "Other", "Total"],
                rows,
            )
        );
        if snapshots.len() >= 2 {
            let last = &snapshots[snapshots.len() - 1];
            let prev = &snapshots[snapshots.len() - 2];
            println!(
                "Latest total {} ({} vs previous month)",
                fmt_yen(last.total()),
                fmt_signed_yen(last.total() - prev.total())
            );
        }
    }
    Ok(())
}
