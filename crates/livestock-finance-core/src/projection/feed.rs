use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calendar;
use crate::error::LivestockFinanceError;
use crate::types::{
    with_metadata, ComputationOutput, CustomPeriodRecord, FeedCostRecord, Lot, Money,
};
use crate::validation;
use crate::LivestockFinanceResult;

use super::weight::custom_day_map;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a lot's feed-investment accrual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedAccrualInput {
    pub lot: Lot,
    pub feed_records: Vec<FeedCostRecord>,
    /// Custom accrual day counts keyed by (year, month).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_periods: Vec<CustomPeriodRecord>,
}

/// Top-level output from `accrue_feed_investment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedAccrualOutput {
    pub lot_name: String,
    /// The fixed up-front livestock investment the accrual sits on top of.
    pub purchase_value: Money,
    pub points: Vec<FeedAccrualPoint>,
    pub total_feed_cost: Money,
    pub final_investment: Money,
}

/// Feed investment standing as of one recorded month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedAccrualPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days: u32,
    pub daily_cost: Money,
    /// daily cost × days × head count.
    pub monthly_cost: Money,
    pub cumulative_feed_cost: Money,
    /// Purchase value plus cumulative feed through this month.
    pub investment_to_date: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Accrue a lot's feed spend month by month on top of its purchase value.
/// Months without a feed record contribute nothing and do not halt the
/// accrual of later months.
pub fn accrue_feed_investment(
    input: &FeedAccrualInput,
) -> LivestockFinanceResult<ComputationOutput<FeedAccrualOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let records = validate_input(input)?;
    let custom_days = custom_day_map(&input.custom_periods, &mut warnings)?;
    let head = Decimal::from(input.lot.head_count);

    let mut points: Vec<FeedAccrualPoint> = Vec::with_capacity(records.len());
    let mut cumulative = Decimal::ZERO;

    for record in &records {
        let days = calendar::effective_days(
            record.year,
            record.month,
            custom_days.get(&(record.year, record.month)).copied(),
        )?;

        let monthly_cost = record.daily_cost * Decimal::from(days) * head;
        cumulative += monthly_cost;

        points.push(FeedAccrualPoint {
            year: record.year,
            month: record.month,
            label: calendar::month_label(record.year, record.month)?,
            days,
            daily_cost: record.daily_cost,
            monthly_cost,
            cumulative_feed_cost: cumulative,
            investment_to_date: input.lot.purchase_value + cumulative,
        });
    }

    let result = FeedAccrualOutput {
        lot_name: input.lot.name.clone(),
        purchase_value: input.lot.purchase_value,
        total_feed_cost: cumulative,
        final_investment: input.lot.purchase_value + cumulative,
        points,
    };

    Ok(with_metadata(
        "Purchase value plus month-chained feed accrual scaled by head count",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &FeedAccrualInput) -> LivestockFinanceResult<Vec<FeedCostRecord>> {
    if input.lot.head_count == 0 {
        return Err(LivestockFinanceError::InvalidInput {
            field: "head_count".into(),
            reason: "head count must be at least 1".into(),
        });
    }
    if input.lot.purchase_value < Decimal::ZERO {
        return Err(LivestockFinanceError::InvalidInput {
            field: "purchase_value".into(),
            reason: "purchase value must be >= 0".into(),
        });
    }
    validation::validate_feed_records(&input.feed_records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
