// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use encoding_rs::SHIFT_JIS;

use crate::merge::merge;
use crate::models::{MajorCategory, Transaction};
use crate::store::{CollectionStore, load_records, save_records};

pub fn handle(store: &dyn CollectionStore, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let bytes = std::fs::read(path).with_context(|| format!("Open CSV {}", path))?;
    let batch = parse_batch(&decode(&bytes))?;
    let imported = batch.len();

    // Import is an explicit write action, so a store failure here is
    // surfaced rather than degraded to empty.
    let existing: Vec<Transaction> = load_records(store)?;
    let merged = merge(existing, batch);
    save_records(store, &merged)?;
    println!("Imported {} rows ({} total)", imported, merged.len());
    Ok(())
}

/// Bank exports arrive as Shift-JIS; hand-made files as UTF-8. Try the
/// legacy encoding first and fall back, mirroring the source data.
pub fn decode(bytes: &[u8]) -> String {
    let (cow, _, had_errors) = SHIFT_JIS.decode(bytes);
    if !had_errors {
        return cow.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => cow.into_owned(),
    }
}

fn find_column(header: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|h| names.iter().any(|n| h.trim() == *n))
}

/// Parse an import CSV into transactions. Date, description and amount
/// columns are required (both English and aggregator-export Japanese
/// headers are recognized); rows with unparseable dates are dropped.
pub fn parse_batch(text: &str) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let header = rdr.headers().context("CSV header")?.clone();

    let date_col = find_column(&header, &["date", "日付"])
        .ok_or_else(|| anyhow!("CSV has no date column"))?;
    let desc_col = find_column(&header, &["description", "内容"])
        .ok_or_else(|| anyhow!("CSV has no description column"))?;
    let amount_col = find_column(&header, &["amount", "raw_amount", "金額（円）"])
        .ok_or_else(|| anyhow!("CSV has no amount column"))?;
    let account_col = find_column(&header, &["account", "保有金融機関"]);
    let major_col = find_column(&header, &["major_category", "大項目"]);
    let minor_col = find_column(&header, &["minor_category", "中項目"]);

    let mut batch = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let Some(date) = rec
            .get(date_col)
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        else {
            continue;
        };
        let cell = |col: Option<usize>| {
            col.and_then(|i| rec.get(i)).map(str::trim).unwrap_or("")
        };
        let minor = cell(minor_col);
        batch.push(Transaction::new(
            date,
            rec.get(desc_col).unwrap_or("").trim(),
            rec.get(amount_col).unwrap_or("").trim(),
            if cell(account_col).is_empty() {
                "import"
            } else {
                cell(account_col)
            },
            MajorCategory::parse(cell(major_col)),
            (!minor.is_empty()).then(|| minor.to_string()),
        ));
    }
    Ok(batch)
}
