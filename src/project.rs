// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use thiserror::Error;

use crate::utils::add_months;

/// Projection chart bounds: always look at least a year out, never more
/// than twenty. The clamp is applied at the CLI boundary; the projector
/// itself takes the horizon as a plain parameter.
pub const MIN_HORIZON_MONTHS: u32 = 12;
pub const MAX_HORIZON_MONTHS: u32 = 240;

pub fn clamp_horizon(months: i64) -> u32 {
    months.clamp(MIN_HORIZON_MONTHS as i64, MAX_HORIZON_MONTHS as i64) as u32
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("at least two history points are required for a projection")]
    InsufficientHistory,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectedPoint {
    pub month: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The last known total already meets the target.
    AlreadyAchieved,
    /// Mean delta is not positive while a gap remains; no finite ETA.
    TargetUnreachable,
    /// Estimated months until the target is reached at the mean pace.
    Eta { months: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// Arithmetic mean of consecutive month-over-month deltas.
    pub monthly_delta: Decimal,
    /// Projected (month, value) points after the last known month, each
    /// clamped at zero.
    pub path: Vec<ProjectedPoint>,
    pub outcome: Outcome,
}

/// Naive linear extrapolation of an asset-total time series toward a
/// target. No seasonality, no weighting, no compounding; that is the
/// model, not a shortcut.
pub fn project(
    history: &[(String, Decimal)],
    target: Decimal,
    horizon_months: u32,
) -> Result<Projection, ProjectError> {
    if history.len() < 2 {
        return Err(ProjectError::InsufficientHistory);
    }
    let deltas: Decimal = history
        .windows(2)
        .map(|w| w[1].1 - w[0].1)
        .sum();
    let monthly_delta = deltas / Decimal::from(history.len() as u64 - 1);

    let (last_month, last_value) = history.last().expect("non-empty history");
    let mut path = Vec::with_capacity(horizon_months as usize);
    let mut value = *last_value;
    for step in 1..=horizon_months {
        value += monthly_delta;
        path.push(ProjectedPoint {
            month: add_months(last_month, step as i32).unwrap_or_else(|| last_month.clone()),
            value: value.max(Decimal::ZERO),
        });
    }

    let gap = target - *last_value;
    let outcome = if gap <= Decimal::ZERO {
        Outcome::AlreadyAchieved
    } else if monthly_delta <= Decimal::ZERO {
        Outcome::TargetUnreachable
    } else {
        let months = (gap / monthly_delta).ceil().to_u32().unwrap_or(u32::MAX);
        Outcome::Eta { months }
    };

    Ok(Projection {
        monthly_delta,
        path,
        outcome,
    })
}
