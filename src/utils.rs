// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const UA: &str = concat!(
    "kakei/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/kakei-app/kakei)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("month key pattern"));

pub fn parse_month(s: &str) -> Result<String> {
    let t = s.trim();
    if !MONTH_RE.is_match(t) {
        anyhow::bail!("Invalid month '{}', expected YYYY-MM", s);
    }
    Ok(t.to_string())
}

pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Step a `YYYY-MM` key forward (or back) by whole months.
pub fn add_months(key: &str, months: i32) -> Option<String> {
    let (y, m) = key.split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: i32 = m.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let total = year * 12 + (month - 1) + months;
    Some(month_key(total.div_euclid(12), (total.rem_euclid(12) + 1) as u32))
}

/// Whole months from `from` to `to`, by calendar position.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `¥1,234` / `-¥500`, rounded to whole yen.
pub fn fmt_yen(v: Decimal) -> String {
    let rounded = v.round();
    let digits = rounded.abs().to_string();
    if rounded < Decimal::ZERO {
        format!("-¥{}", group_thousands(&digits))
    } else {
        format!("¥{}", group_thousands(&digits))
    }
}

/// Signed variant used for balances and deltas: `+¥300` / `-¥500` / `¥0`.
pub fn fmt_signed_yen(v: Decimal) -> String {
    let rounded = v.round();
    if rounded > Decimal::ZERO {
        format!("+{}", fmt_yen(rounded))
    } else {
        fmt_yen(rounded)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Auth gate: a submitted secret against the configured one. Owns no
/// ledger data; an empty configured secret never authenticates.
pub fn check_passphrase(submitted: &str, configured: &str) -> bool {
    !configured.is_empty() && submitted == configured
}
