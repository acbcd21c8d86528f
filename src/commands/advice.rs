// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, Local};
use serde_json::json;

use crate::advice::build_prompt;
use crate::models::{JournalEntry, Transaction};
use crate::store::{CollectionStore, load_or_empty};
use crate::utils::http_client;

/// Environment variable naming the text-generation endpoint. When unset,
/// or when the endpoint is unreachable, the prompt is printed for manual
/// copy instead.
pub const ADVICE_URL_VAR: &str = "KAKEI_ADVICE_URL";
pub const ADVICE_TOKEN_VAR: &str = "KAKEI_ADVICE_TOKEN";

pub fn handle(store: &dyn CollectionStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = Local::now().date_naive();
    let year = *sub.get_one::<i32>("year").unwrap_or(&today.year());
    let month = sub.get_one::<u32>("month").copied().unwrap_or(today.month());

    let ledger: Vec<Transaction> = load_or_empty(store);
    let journal: Vec<JournalEntry> = load_or_empty(store);
    let prompt = build_prompt(&ledger, &journal, year, month);

    if sub.get_flag("send") {
        if let Ok(url) = std::env::var(ADVICE_URL_VAR) {
            match send(&url, &prompt) {
                Ok(text) => {
                    println!("{}", text);
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("Advice endpoint unreachable ({}); showing the prompt instead.", e);
                }
            }
        } else {
            eprintln!(
                "{} is not set; showing the prompt for manual copy.",
                ADVICE_URL_VAR
            );
        }
    }
    println!("{}", prompt);
    Ok(())
}

fn send(url: &str, prompt: &str) -> Result<String> {
    let client = http_client()?;
    let mut req = client.post(url).json(&json!({ "prompt": prompt }));
    if let Ok(token) = std::env::var(ADVICE_TOKEN_VAR) {
        req = req.bearer_auth(token);
    }
    let resp = req.send()?.error_for_status()?;
    Ok(resp.text()?)
}
