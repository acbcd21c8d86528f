// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unparseable amount '{0}'")]
pub struct AmountParseError(pub String);

/// Parse a money token as exported by banks and aggregator sites.
///
/// Recognized decorations: thousands separators, the yen glyph, a
/// backslash-escaped yen glyph, and the `▲` negative marker. Everything
/// else must form a plain decimal number.
pub fn try_normalize_amount(raw: &str) -> Result<Decimal, AmountParseError> {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        match ch {
            ',' | '¥' | '\\' => {}
            '▲' => cleaned.push('-'),
            c if c.is_whitespace() => {}
            c => cleaned.push(c),
        }
    }
    if cleaned.is_empty() {
        return Err(AmountParseError(raw.to_string()));
    }
    cleaned
        .parse::<Decimal>()
        .map_err(|_| AmountParseError(raw.to_string()))
}

/// Lenient wrapper: malformed or empty input becomes zero so that one bad
/// cell never sinks an aggregate pass. Callers that need to tell malformed
/// apart from a genuine zero use [`try_normalize_amount`].
pub fn normalize_amount(raw: &str) -> Decimal {
    try_normalize_amount(raw).unwrap_or(Decimal::ZERO)
}
