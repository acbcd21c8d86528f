// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use kakei::aggregate::{self, Scope};
use kakei::cli;
use kakei::commands::importer::{self, decode, parse_batch};
use kakei::models::{MajorCategory, Transaction};
use kakei::store::{MemStore, load_records};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

fn run_import(store: &MemStore, path: &str) {
    let matches = cli::build_cli().get_matches_from(["kakei", "import", path]);
    let Some(("import", sub)) = matches.subcommand() else {
        panic!("import subcommand not matched");
    };
    importer::handle(store, sub).unwrap();
}

#[test]
fn csv_import_into_empty_ledger_end_to_end() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "date,description,amount\n2024-05-01,Lunch,-¥500\n2024-05-02,Salary,¥300000\n"
    )
    .unwrap();
    file.flush().unwrap();

    let store = MemStore::new();
    run_import(&store, file.path().to_str().unwrap());

    let ledger: Vec<Transaction> = load_records(&store).unwrap();
    assert_eq!(ledger.len(), 2);

    let scope = Scope::month(2024, 5);
    assert_eq!(aggregate::sum_income(&ledger, scope), Decimal::from(300000));
    assert_eq!(aggregate::sum_expense(&ledger, scope), Decimal::from(500));
    assert_eq!(aggregate::balance(&ledger, scope), Decimal::from(299500));

    // No category column: everything lands in the unclassified bucket.
    let breakdown = aggregate::category_breakdown(&ledger, scope);
    assert_eq!(
        breakdown,
        vec![(MajorCategory::Unclassified, Decimal::from(500))]
    );
}

#[test]
fn reimporting_the_same_file_does_not_duplicate() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "date,description,amount\n2024-05-01,Lunch,-500\n2024-05-02,Salary,300000\n"
    )
    .unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap();

    let store = MemStore::new();
    run_import(&store, path);
    run_import(&store, path);

    let ledger: Vec<Transaction> = load_records(&store).unwrap();
    assert_eq!(ledger.len(), 2);
}

#[test]
fn shift_jis_export_with_japanese_headers_imports() {
    let text = "日付,内容,金額（円）,保有金融機関,大項目,中項目\n\
                2024-05-01,昼食,-¥500,銀行,食費,外食\n";
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!had_errors);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let store = MemStore::new();
    run_import(&store, file.path().to_str().unwrap());

    let ledger: Vec<Transaction> = load_records(&store).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].description, "昼食");
    assert_eq!(ledger[0].account, "銀行");
    assert_eq!(ledger[0].major_category, MajorCategory::Food);
    assert_eq!(ledger[0].minor_category.as_deref(), Some("外食"));
    assert_eq!(ledger[0].amount, Decimal::from(-500));
}

#[test]
fn utf8_files_fall_back_when_shift_jis_decoding_fails() {
    // 語 ends in byte 0x9E, a Shift-JIS lead byte; followed by an ASCII
    // comma it forms an invalid pair, which forces the UTF-8 fallback.
    let text = "date,description,amount\n2024-05-01,英語,-500\n";
    assert_eq!(decode(text.as_bytes()), text);

    let batch = parse_batch(&decode(text.as_bytes())).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].description, "英語");
}

#[test]
fn rows_with_unparseable_dates_are_dropped() {
    let text = "date,description,amount\nsoon,Lunch,-500\n2024-05-02,Salary,300000\n";
    let batch = parse_batch(text).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].description, "Salary");
}

#[test]
fn missing_required_columns_is_an_error() {
    assert!(parse_batch("description,amount\nLunch,-500\n").is_err());
    assert!(parse_batch("date,amount\n2024-05-01,-500\n").is_err());
    assert!(parse_batch("date,description\n2024-05-01,Lunch\n").is_err());
}

#[test]
fn malformed_amounts_import_as_zero_rather_than_failing() {
    let text = "date,description,amount\n2024-05-01,Mystery,garbage\n";
    let batch = parse_batch(text).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].amount, Decimal::ZERO);
    assert_eq!(batch[0].raw_amount, "garbage");
}
