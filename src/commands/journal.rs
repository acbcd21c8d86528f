// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::models::JournalEntry;
use crate::store::{CollectionStore, load_or_empty, load_records, save_records};
use crate::utils::{maybe_print_json, parse_month, pretty_table};

pub fn handle(store: &dyn CollectionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let score = *sub.get_one::<u8>("score").unwrap();
    let comment = sub.get_one::<String>("comment").unwrap().trim().to_string();
    if comment.is_empty() {
        return Err(anyhow!("Comment must not be empty"));
    }

    let mut entries: Vec<JournalEntry> = load_records(store)?;
    entries.retain(|e| e.month != month);
    entries.push(JournalEntry {
        month: month.clone(),
        comment,
        score,
    });
    entries.sort_by(|a, b| b.month.cmp(&a.month));
    save_records(store, &entries)?;
    println!("Review saved for {}", month);
    Ok(())
}

fn list(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let entries: Vec<JournalEntry> = load_or_empty(store);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.month.clone(),
                    format!("{}/10", e.score),
                    e.comment.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Score", "Comment"], rows));
    }
    Ok(())
}
