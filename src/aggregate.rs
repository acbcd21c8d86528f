// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CostType, MajorCategory, Transaction};

/// A (year) or (year, month) filter over the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub year: i32,
    pub month: Option<u32>,
}

impl Scope {
    pub fn year(year: i32) -> Self {
        Scope { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Scope {
            year,
            month: Some(month),
        }
    }

    pub fn contains(&self, tx: &Transaction) -> bool {
        tx.year == self.year && self.month.is_none_or(|m| tx.month == m)
    }
}

pub fn sum_income(txs: &[Transaction], scope: Scope) -> Decimal {
    txs.iter()
        .filter(|t| scope.contains(t) && t.is_income())
        .map(|t| t.amount)
        .sum()
}

pub fn sum_expense(txs: &[Transaction], scope: Scope) -> Decimal {
    txs.iter()
        .filter(|t| scope.contains(t) && t.is_expense())
        .map(|t| t.absolute_amount)
        .sum()
}

pub fn balance(txs: &[Transaction], scope: Scope) -> Decimal {
    sum_income(txs, scope) - sum_expense(txs, scope)
}

/// Expense totals per category, largest first.
pub fn category_breakdown(txs: &[Transaction], scope: Scope) -> Vec<(MajorCategory, Decimal)> {
    let mut agg: HashMap<MajorCategory, Decimal> = HashMap::new();
    for t in txs.iter().filter(|t| scope.contains(t) && t.is_expense()) {
        *agg.entry(t.major_category).or_insert(Decimal::ZERO) += t.absolute_amount;
    }
    let mut out: Vec<_> = agg.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.as_str().cmp(b.0.as_str())));
    out
}

/// (fixed, variable) expense totals within scope.
pub fn fixed_variable_split(txs: &[Transaction], scope: Scope) -> (Decimal, Decimal) {
    let mut fixed = Decimal::ZERO;
    let mut variable = Decimal::ZERO;
    for t in txs.iter().filter(|t| scope.contains(t) && t.is_expense()) {
        match t.cost_type {
            CostType::Fixed => fixed += t.absolute_amount,
            CostType::Variable => variable += t.absolute_amount,
        }
    }
    (fixed, variable)
}

/// Number of distinct months in `year` with any expense activity, floored
/// at one so monthly averages never divide by zero.
pub fn active_months(txs: &[Transaction], year: i32) -> u32 {
    let months: BTreeSet<u32> = txs
        .iter()
        .filter(|t| t.year == year && t.is_expense())
        .map(|t| t.month)
        .collect();
    (months.len() as u32).max(1)
}

/// Yearly category total divided by the count of expense-active months,
/// not a fixed twelve.
pub fn month_average(txs: &[Transaction], category: MajorCategory, year: i32) -> Decimal {
    let total: Decimal = txs
        .iter()
        .filter(|t| t.year == year && t.is_expense() && t.major_category == category)
        .map(|t| t.absolute_amount)
        .sum();
    total / Decimal::from(active_months(txs, year))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearOverYear {
    /// Previous period was zero; a percentage would be meaningless.
    NoPriorData,
    /// Percentage change against the prior period.
    Delta(Decimal),
}

pub fn year_over_year(current: Decimal, previous: Decimal) -> YearOverYear {
    if previous.is_zero() {
        return YearOverYear::NoPriorData;
    }
    YearOverYear::Delta((current - previous) / previous.abs() * Decimal::from(100))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetUtilization {
    /// Spend over budget, capped at 1.0 for display.
    pub ratio: Decimal,
    /// Signed remainder `budget - spent`; negative means overspent.
    pub remainder: Decimal,
}

pub fn budget_utilization(spent: Decimal, budget: Decimal) -> BudgetUtilization {
    let ratio = if budget > Decimal::ZERO {
        (spent / budget).min(Decimal::ONE)
    } else {
        Decimal::ZERO
    };
    BudgetUtilization {
        ratio,
        remainder: budget - spent,
    }
}
