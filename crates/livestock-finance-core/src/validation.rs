//! Input boundary: converts loosely-populated records from the data-entry
//! layer into the engine's typed inputs, rejecting malformed values with an
//! explicit reason instead of silently dropping them.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::LivestockFinanceError;
use crate::types::{
    CustomPeriodRecord, FeedCostRecord, FixedCostRecord, GrowthRecord, Lot, MortalityRecord,
    Percent, RevenueRecord,
};
use crate::LivestockFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A lot as the data-entry layer holds it, before baselines are guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_weight_kg: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_weight_arroba: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_value: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Promote a raw lot to a typed one, or say exactly why it cannot be.
pub fn validate_lot(raw: &RawLot) -> LivestockFinanceResult<Lot> {
    if raw.name.trim().is_empty() {
        return Err(LivestockFinanceError::InvalidInput {
            field: "name".into(),
            reason: "lot name must not be empty".into(),
        });
    }

    let entry_weight_kg = raw.entry_weight_kg.ok_or_else(|| missing(raw, "entry_weight_kg"))?;
    let purchase_value = raw.purchase_value.ok_or_else(|| missing(raw, "purchase_value"))?;
    let head_count = raw.head_count.ok_or_else(|| LivestockFinanceError::InvalidInput {
        field: "head_count".into(),
        reason: format!("lot '{}' has no head count", raw.name),
    })?;

    if head_count == 0 {
        return Err(LivestockFinanceError::InvalidInput {
            field: "head_count".into(),
            reason: "head count must be at least 1".into(),
        });
    }
    non_negative("entry_weight_kg", entry_weight_kg)?;
    non_negative("purchase_value", purchase_value)?;
    if let Some(arroba) = raw.entry_weight_arroba {
        non_negative("entry_weight_arroba", arroba)?;
    }

    Ok(Lot {
        name: raw.name.clone(),
        head_count,
        entry_weight_kg,
        entry_weight_arroba: raw.entry_weight_arroba,
        purchase_value,
    })
}

/// Validate a lot's growth series and return it sorted by (year, month).
pub fn validate_growth_records(
    records: &[GrowthRecord],
) -> LivestockFinanceResult<Vec<GrowthRecord>> {
    let mut seen: HashSet<(i32, u32)> = HashSet::new();
    for r in records {
        calendar::days_in_month(r.year, r.month)?;
        non_negative("daily_gain_kg", r.daily_gain_kg)?;
        unique("growth_records", &mut seen, r.year, r.month)?;
    }
    Ok(sorted_by_period(records, |r| (r.year, r.month)))
}

/// Validate a lot's feed-cost series and return it sorted by (year, month).
pub fn validate_feed_records(
    records: &[FeedCostRecord],
) -> LivestockFinanceResult<Vec<FeedCostRecord>> {
    let mut seen: HashSet<(i32, u32)> = HashSet::new();
    for r in records {
        calendar::days_in_month(r.year, r.month)?;
        non_negative("daily_cost", r.daily_cost)?;
        unique("feed_records", &mut seen, r.year, r.month)?;
    }
    Ok(sorted_by_period(records, |r| (r.year, r.month)))
}

/// Validate a lot's mortality series and return it sorted by (year, month).
pub fn validate_mortality_records(
    records: &[MortalityRecord],
) -> LivestockFinanceResult<Vec<MortalityRecord>> {
    let mut seen: HashSet<(i32, u32)> = HashSet::new();
    for r in records {
        calendar::days_in_month(r.year, r.month)?;
        percentage("mortality_pct", r.mortality_pct)?;
        unique("mortality_records", &mut seen, r.year, r.month)?;
    }
    Ok(sorted_by_period(records, |r| (r.year, r.month)))
}

/// Validate custom accrual periods and return them sorted by (year, month).
pub fn validate_custom_periods(
    records: &[CustomPeriodRecord],
) -> LivestockFinanceResult<Vec<CustomPeriodRecord>> {
    let mut seen: HashSet<(i32, u32)> = HashSet::new();
    for r in records {
        calendar::days_in_month(r.year, r.month)?;
        if r.days == 0 {
            return Err(LivestockFinanceError::InvalidInput {
                field: "custom_periods".into(),
                reason: format!("custom period for {}/{} must be at least 1 day", r.month, r.year),
            });
        }
        unique("custom_periods", &mut seen, r.year, r.month)?;
    }
    Ok(sorted_by_period(records, |r| (r.year, r.month)))
}

/// Validate a property's fixed-cost ledger; uniqueness is per category.
pub fn validate_fixed_cost_records(
    records: &[FixedCostRecord],
) -> LivestockFinanceResult<Vec<FixedCostRecord>> {
    let mut seen = HashSet::new();
    for r in records {
        calendar::days_in_month(r.year, r.month)?;
        non_negative("amount", r.amount)?;
        if !seen.insert((r.category, r.year, r.month)) {
            return Err(LivestockFinanceError::InvalidInput {
                field: "fixed_cost_records".into(),
                reason: format!("duplicate {:?} entry for {}/{}", r.category, r.month, r.year),
            });
        }
    }
    Ok(sorted_by_period(records, |r| (r.year, r.month)))
}

/// Validate a property's revenue ledger; uniqueness is per category.
pub fn validate_revenue_records(
    records: &[RevenueRecord],
) -> LivestockFinanceResult<Vec<RevenueRecord>> {
    let mut seen = HashSet::new();
    for r in records {
        calendar::days_in_month(r.year, r.month)?;
        non_negative("amount", r.amount)?;
        if !seen.insert((r.category, r.year, r.month)) {
            return Err(LivestockFinanceError::InvalidInput {
                field: "revenue_records".into(),
                reason: format!("duplicate {:?} entry for {}/{}", r.category, r.month, r.year),
            });
        }
    }
    Ok(sorted_by_period(records, |r| (r.year, r.month)))
}

/// Carcass yield must be a usable percentage: strictly positive, at most 100.
pub fn validate_carcass_yield(pct: Percent) -> LivestockFinanceResult<Percent> {
    if pct <= Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(LivestockFinanceError::InvalidInput {
            field: "carcass_yield_pct".into(),
            reason: "must be greater than 0 and at most 100".into(),
        });
    }
    Ok(pct)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn missing(raw: &RawLot, field: &str) -> LivestockFinanceError {
    LivestockFinanceError::MissingBaseline {
        lot: raw.name.clone(),
        field: field.into(),
    }
}

fn non_negative(field: &str, value: Decimal) -> LivestockFinanceResult<()> {
    if value < Decimal::ZERO {
        return Err(LivestockFinanceError::InvalidInput {
            field: field.into(),
            reason: format!("must be >= 0, got {value}"),
        });
    }
    Ok(())
}

fn percentage(field: &str, value: Decimal) -> LivestockFinanceResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(LivestockFinanceError::InvalidInput {
            field: field.into(),
            reason: format!("must lie in [0, 100], got {value}"),
        });
    }
    Ok(())
}

fn unique(
    field: &str,
    seen: &mut HashSet<(i32, u32)>,
    year: i32,
    month: u32,
) -> LivestockFinanceResult<()> {
    if !seen.insert((year, month)) {
        return Err(LivestockFinanceError::InvalidInput {
            field: field.into(),
            reason: format!("duplicate record for {month}/{year}"),
        });
    }
    Ok(())
}

fn sorted_by_period<T: Clone>(records: &[T], key: impl Fn(&T) -> (i32, u32)) -> Vec<T> {
    let mut out = records.to_vec();
    out.sort_by_key(key);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
