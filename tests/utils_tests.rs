// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kakei::utils::{
    add_months, check_passphrase, fmt_signed_yen, fmt_yen, month_key, months_between,
    parse_month,
};
use rust_decimal::Decimal;

#[test]
fn month_keys_are_validated() {
    assert_eq!(parse_month("2024-06").unwrap(), "2024-06");
    assert_eq!(parse_month(" 2024-12 ").unwrap(), "2024-12");
    assert!(parse_month("2024-13").is_err());
    assert!(parse_month("2024-6").is_err());
    assert!(parse_month("June 2024").is_err());
}

#[test]
fn month_arithmetic_rolls_over_years() {
    assert_eq!(add_months("2024-11", 3).unwrap(), "2025-02");
    assert_eq!(add_months("2024-01", -2).unwrap(), "2023-11");
    assert_eq!(add_months("2024-05", 0).unwrap(), "2024-05");
    assert!(add_months("garbage", 1).is_none());
    assert_eq!(month_key(2024, 7), "2024-07");
}

#[test]
fn months_between_uses_calendar_position() {
    let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    assert_eq!(months_between(d("2024-05-31"), d("2024-06-01")), 1);
    assert_eq!(months_between(d("2024-05-01"), d("2026-05-01")), 24);
    assert_eq!(months_between(d("2024-05-01"), d("2024-03-01")), -2);
}

#[test]
fn yen_formatting_groups_thousands() {
    assert_eq!(fmt_yen(Decimal::from(0)), "¥0");
    assert_eq!(fmt_yen(Decimal::from(500)), "¥500");
    assert_eq!(fmt_yen(Decimal::from(1234)), "¥1,234");
    assert_eq!(fmt_yen(Decimal::from(1234567)), "¥1,234,567");
    assert_eq!(fmt_yen(Decimal::from(-500)), "-¥500");
    assert_eq!(fmt_signed_yen(Decimal::from(300)), "+¥300");
    assert_eq!(fmt_signed_yen(Decimal::from(-300)), "-¥300");
    assert_eq!(fmt_signed_yen(Decimal::ZERO), "¥0");
}

#[test]
fn auth_gate_rejects_unless_configured_and_matching() {
    assert!(check_passphrase("hunter2", "hunter2"));
    assert!(!check_passphrase("wrong", "hunter2"));
    assert!(!check_passphrase("", ""));
    assert!(!check_passphrase("anything", ""));
}
