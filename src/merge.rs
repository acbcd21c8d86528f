// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::Transaction;

/// Reconcile a freshly imported batch into the persisted ledger.
///
/// Existing then incoming are concatenated with each side's relative order
/// intact, de-duplicated on (date, description, raw amount text) keeping
/// the last occurrence, then sorted by date descending. An incoming record
/// that shares an identity key with an existing one therefore overwrites
/// it: last write wins. Merging a batch with itself is a no-op in size.
pub fn merge(existing: Vec<Transaction>, incoming: Vec<Transaction>) -> Vec<Transaction> {
    let mut slots: Vec<Option<Transaction>> =
        Vec::with_capacity(existing.len() + incoming.len());
    let mut seen: HashMap<(NaiveDate, String, String), usize> = HashMap::new();

    for tx in existing.into_iter().chain(incoming) {
        let key = (tx.date, tx.description.clone(), tx.raw_amount.clone());
        if let Some(&prev) = seen.get(&key) {
            slots[prev] = None;
        }
        seen.insert(key, slots.len());
        slots.push(Some(tx));
    }

    let mut merged: Vec<Transaction> = slots.into_iter().flatten().collect();
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}
