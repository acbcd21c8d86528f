// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::normalize_amount;
use crate::store::{Record, RowView};

/// Fixed set of ledger categories. Anything outside this set is folded
/// into `Unclassified` at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorCategory {
    Housing,
    DailyGoods,
    Food,
    Special,
    ClothingBeauty,
    HealthMedical,
    TaxSocial,
    Automobile,
    Utilities,
    Insurance,
    HobbyLeisure,
    CashCard,
    SocialExpenses,
    Education,
    Communications,
    Unclassified,
    Transport,
}

impl MajorCategory {
    pub const ALL: [MajorCategory; 17] = [
        MajorCategory::Housing,
        MajorCategory::DailyGoods,
        MajorCategory::Food,
        MajorCategory::Special,
        MajorCategory::ClothingBeauty,
        MajorCategory::HealthMedical,
        MajorCategory::TaxSocial,
        MajorCategory::Automobile,
        MajorCategory::Utilities,
        MajorCategory::Insurance,
        MajorCategory::HobbyLeisure,
        MajorCategory::CashCard,
        MajorCategory::SocialExpenses,
        MajorCategory::Education,
        MajorCategory::Communications,
        MajorCategory::Unclassified,
        MajorCategory::Transport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MajorCategory::Housing => "housing",
            MajorCategory::DailyGoods => "daily_goods",
            MajorCategory::Food => "food",
            MajorCategory::Special => "special",
            MajorCategory::ClothingBeauty => "clothing_beauty",
            MajorCategory::HealthMedical => "health_medical",
            MajorCategory::TaxSocial => "tax_social",
            MajorCategory::Automobile => "automobile",
            MajorCategory::Utilities => "utilities",
            MajorCategory::Insurance => "insurance",
            MajorCategory::HobbyLeisure => "hobby_leisure",
            MajorCategory::CashCard => "cash_card",
            MajorCategory::SocialExpenses => "social_expenses",
            MajorCategory::Education => "education",
            MajorCategory::Communications => "communications",
            MajorCategory::Unclassified => "unclassified",
            MajorCategory::Transport => "transport",
        }
    }

    /// Label used by the bank-aggregator CSV exports this tool imports.
    pub fn label_jp(&self) -> &'static str {
        match self {
            MajorCategory::Housing => "住宅",
            MajorCategory::DailyGoods => "日用品",
            MajorCategory::Food => "食費",
            MajorCategory::Special => "特別な支出",
            MajorCategory::ClothingBeauty => "衣服・美容",
            MajorCategory::HealthMedical => "健康・医療",
            MajorCategory::TaxSocial => "税・社会保障",
            MajorCategory::Automobile => "自動車",
            MajorCategory::Utilities => "水道・光熱費",
            MajorCategory::Insurance => "保険",
            MajorCategory::HobbyLeisure => "趣味・娯楽",
            MajorCategory::CashCard => "現金・カード",
            MajorCategory::SocialExpenses => "交際費",
            MajorCategory::Education => "教養・教育",
            MajorCategory::Communications => "通信費",
            MajorCategory::Unclassified => "未分類",
            MajorCategory::Transport => "交通費",
        }
    }

    /// Accepts the slug form or the Japanese export label; anything else
    /// falls back to `Unclassified`.
    pub fn parse(s: &str) -> MajorCategory {
        let t = s.trim();
        for cat in MajorCategory::ALL {
            if t == cat.as_str() || t == cat.label_jp() {
                return cat;
            }
        }
        MajorCategory::Unclassified
    }

    pub fn cost_type(&self) -> CostType {
        match self {
            MajorCategory::Housing
            | MajorCategory::Utilities
            | MajorCategory::Insurance
            | MajorCategory::Communications
            | MajorCategory::TaxSocial
            | MajorCategory::Automobile => CostType::Fixed,
            _ => CostType::Variable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Fixed,
    Variable,
}

impl CostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostType::Fixed => "fixed",
            CostType::Variable => "variable",
        }
    }
}

/// One ledger entry. Immutable once persisted; the ledger as a whole is
/// rewritten on every save. `year`, `month`, `absolute_amount` and
/// `cost_type` are always derived here and never read back blindly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Verbatim source text of the amount. Part of the identity key used
    /// for de-duplication, so it survives normalization.
    pub raw_amount: String,
    pub account: String,
    pub major_category: MajorCategory,
    pub minor_category: Option<String>,
    pub amount: Decimal,
    pub absolute_amount: Decimal,
    pub year: i32,
    pub month: u32,
    pub cost_type: CostType,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        raw_amount: impl Into<String>,
        account: impl Into<String>,
        major_category: MajorCategory,
        minor_category: Option<String>,
    ) -> Self {
        let raw_amount = raw_amount.into();
        let amount = normalize_amount(&raw_amount);
        Transaction {
            date,
            description: description.into(),
            account: account.into(),
            major_category,
            minor_category,
            amount,
            absolute_amount: amount.abs(),
            year: date.year(),
            month: date.month(),
            cost_type: major_category.cost_type(),
            raw_amount,
        }
    }

    /// De-duplication identity: (date, description, raw amount text).
    /// Two real transactions that share all three collapse into one on
    /// merge; that is the accepted contract, not an accident.
    pub fn identity_key(&self) -> (NaiveDate, &str, &str) {
        (self.date, &self.description, &self.raw_amount)
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

impl Record for Transaction {
    const COLLECTION: &'static str = "transactions";
    const HEADER: &'static [&'static str] = &[
        "date",
        "description",
        "raw_amount",
        "account",
        "major_category",
        "minor_category",
        "year",
        "month",
        "amount",
        "absolute_amount",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.description.clone(),
            self.raw_amount.clone(),
            self.account.clone(),
            self.major_category.as_str().to_string(),
            self.minor_category.clone().unwrap_or_default(),
            self.year.to_string(),
            self.month.to_string(),
            self.amount.to_string(),
            self.absolute_amount.to_string(),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Option<Self> {
        // A row without a parseable date is dropped, never an error.
        let date = NaiveDate::parse_from_str(row.get("date"), "%Y-%m-%d").ok()?;
        let minor = row.get("minor_category").trim();
        Some(Transaction::new(
            date,
            row.get("description"),
            row.get("raw_amount"),
            row.get("account"),
            MajorCategory::parse(row.get("major_category")),
            if minor.is_empty() {
                None
            } else {
                Some(minor.to_string())
            },
        ))
    }
}

/// Monthly budget for one category. Zero means "unset" and is never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: MajorCategory,
    pub amount: Decimal,
}

impl Record for CategoryBudget {
    const COLLECTION: &'static str = "budgets";
    const HEADER: &'static [&'static str] = &["category", "budget_amount"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.category.as_str().to_string(),
            self.amount.to_string(),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Option<Self> {
        Some(CategoryBudget {
            category: MajorCategory::parse(row.get("category")),
            amount: normalize_amount(row.get("budget_amount")),
        })
    }
}

/// Asset totals for one calendar month, keyed by `YYYY-MM`. The total is
/// always the sum of the four parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub month: String,
    pub cash: Decimal,
    pub securities: Decimal,
    pub retirement: Decimal,
    pub other: Decimal,
}

impl AssetSnapshot {
    pub fn total(&self) -> Decimal {
        self.cash + self.securities + self.retirement + self.other
    }
}

impl Record for AssetSnapshot {
    const COLLECTION: &'static str = "assets";
    const HEADER: &'static [&'static str] =
        &["month_key", "cash", "securities", "retirement", "other", "total"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.cash.to_string(),
            self.securities.to_string(),
            self.retirement.to_string(),
            self.other.to_string(),
            self.total().to_string(),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Option<Self> {
        let month = row.get("month_key").trim().to_string();
        if month.is_empty() {
            return None;
        }
        // The persisted total column is display-only; it is recomputed
        // from the parts on every read.
        Some(AssetSnapshot {
            month,
            cash: normalize_amount(row.get("cash")),
            securities: normalize_amount(row.get("securities")),
            retirement: normalize_amount(row.get("retirement")),
            other: normalize_amount(row.get("other")),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
}

impl Record for Goal {
    const COLLECTION: &'static str = "goals";
    const HEADER: &'static [&'static str] = &["name", "target_amount", "target_date"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.target_amount.to_string(),
            self.target_date.to_string(),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Option<Self> {
        let date = NaiveDate::parse_from_str(row.get("target_date"), "%Y-%m-%d").ok()?;
        Some(Goal {
            name: row.get("name").trim().to_string(),
            target_amount: normalize_amount(row.get("target_amount")),
            target_date: date,
        })
    }
}

/// Free-text monthly review with a 1-10 satisfaction score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub month: String,
    pub comment: String,
    pub score: u8,
}

impl Record for JournalEntry {
    const COLLECTION: &'static str = "journal";
    const HEADER: &'static [&'static str] = &["month_key", "comment", "score"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.comment.clone(),
            self.score.to_string(),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Option<Self> {
        let month = row.get("month_key").trim().to_string();
        if month.is_empty() {
            return None;
        }
        let score: u8 = row.get("score").trim().parse().unwrap_or(5);
        Some(JournalEntry {
            month,
            comment: row.get("comment").to_string(),
            score: score.clamp(1, 10),
        })
    }
}
