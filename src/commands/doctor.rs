// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::advice::ADVICE_URL_VAR;
use crate::commands::auth::PASSPHRASE_VAR;
use crate::models::{AssetSnapshot, CategoryBudget, Goal, JournalEntry, Transaction};
use crate::store::{CollectionStore, Record, load_records};

pub fn handle(store: &dyn CollectionStore) -> Result<()> {
    println!("kakei doctor");
    check::<Transaction>(store);
    check::<CategoryBudget>(store);
    check::<AssetSnapshot>(store);
    check::<Goal>(store);
    check::<JournalEntry>(store);

    let advice = if std::env::var(ADVICE_URL_VAR).is_ok() {
        "configured"
    } else {
        "not configured (prompts shown for manual copy)"
    };
    println!("- advice endpoint: {}", advice);
    let gate = if std::env::var(PASSPHRASE_VAR).is_ok() {
        "configured"
    } else {
        "not configured"
    };
    println!("- auth gate: {}", gate);
    Ok(())
}

fn check<R: Record>(store: &dyn CollectionStore) {
    match load_records::<R>(store) {
        Ok(records) => println!("- {}: {} records", R::COLLECTION, records.len()),
        Err(e) => println!("- {}: UNAVAILABLE ({})", R::COLLECTION, e),
    }
}
