use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::LivestockFinanceError;
use crate::types::{
    with_metadata, Arrobas, ComputationOutput, CustomPeriodRecord, FeedCostRecord, GrowthRecord,
    Kilograms, Lot, Money, MortalityRecord, Percent, KG_PER_ARROBA,
};
use crate::validation;
use crate::LivestockFinanceResult;

use super::weight::{project_weight, WeightProjectionInput};

/// Yield applied when a property has never recorded one.
pub const DEFAULT_CARCASS_YIELD_PCT: Decimal = dec!(50);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a lot's yield and break-even analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub lot: Lot,
    pub growth_records: Vec<GrowthRecord>,
    pub feed_records: Vec<FeedCostRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mortality_records: Vec<MortalityRecord>,
    /// Carcass yield percentage (0–100]; defaults to 50 when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carcass_yield_pct: Option<Percent>,
    /// Flat daily-gain override forwarded to the weight projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_gain_override: Option<Kilograms>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_periods: Vec<CustomPeriodRecord>,
}

/// Top-level output from `analyze_break_even`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenOutput {
    pub lot_name: String,
    pub head_count: u32,
    /// Echo of the yield actually applied, for pre-fill persistence.
    pub carcass_yield_used: Percent,
    pub rows: Vec<BreakEvenRow>,
}

/// One month of the break-even dashboard for a lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenRow {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days: u32,
    pub entry_weight_kg: Kilograms,
    /// Live-weight arroba equivalent at month start, chained from the prior
    /// month's exit weight.
    pub entry_weight_arroba: Arrobas,
    pub exit_weight_kg: Kilograms,
    pub daily_gain_kg: Kilograms,
    /// Zero for months with no feed record.
    pub daily_feed_cost: Money,
    pub purchase_investment: Money,
    /// Feed spend accumulated through this month.
    pub feed_investment: Money,
    pub total_investment: Money,
    pub arroba_per_head: Arrobas,
    pub mortality_pct: Percent,
    pub surviving_head: Decimal,
    pub total_arroba: Arrobas,
    /// Investment / total arrobas; zero when nothing saleable yet.
    pub break_even_price: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Walk the lot's projected weight curve and price each month's saleable
/// arroba output against the investment standing at that point. Feed and
/// mortality series are left-joined onto the weight projection's (year,
/// month) keys: a joined month missing a feed record carries the prior
/// cumulative forward, and missing mortality means none recorded.
pub fn analyze_break_even(
    input: &BreakEvenInput,
) -> LivestockFinanceResult<ComputationOutput<BreakEvenOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (feed_by_period, mortality_by_period) = validate_input(input)?;

    let yield_pct = match input.carcass_yield_pct {
        Some(pct) => validation::validate_carcass_yield(pct)?,
        None => {
            warnings.push(format!(
                "carcass yield not set; defaulting to {DEFAULT_CARCASS_YIELD_PCT}%"
            ));
            DEFAULT_CARCASS_YIELD_PCT
        }
    };

    let projection = project_weight(&WeightProjectionInput {
        lot: input.lot.clone(),
        growth_records: input.growth_records.clone(),
        daily_gain_override: input.daily_gain_override,
        custom_periods: input.custom_periods.clone(),
    })?;
    warnings.extend(projection.warnings);

    let head = Decimal::from(input.lot.head_count);
    let yield_fraction = yield_pct / Decimal::ONE_HUNDRED;

    let mut rows: Vec<BreakEvenRow> = Vec::with_capacity(projection.result.points.len());
    let mut entry_arroba = input.lot.entry_arroba();
    let mut cumulative_feed = Decimal::ZERO;

    for point in &projection.result.points {
        let key = (point.year, point.month);

        let daily_feed_cost = feed_by_period.get(&key).copied().unwrap_or(Decimal::ZERO);
        cumulative_feed += daily_feed_cost * Decimal::from(point.days) * head;
        let total_investment = input.lot.purchase_value + cumulative_feed;

        let carcass_weight = point.end_weight_kg * yield_fraction;
        let arroba_per_head = carcass_weight / KG_PER_ARROBA;

        let mortality_pct = mortality_by_period
            .get(&key)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let surviving_head = head * (Decimal::ONE - mortality_pct / Decimal::ONE_HUNDRED);
        let total_arroba = surviving_head * arroba_per_head;

        let break_even_price = if total_arroba > Decimal::ZERO {
            total_investment / total_arroba
        } else {
            Decimal::ZERO
        };

        rows.push(BreakEvenRow {
            year: point.year,
            month: point.month,
            label: point.label.clone(),
            days: point.days,
            entry_weight_kg: point.start_weight_kg,
            entry_weight_arroba: entry_arroba,
            exit_weight_kg: point.end_weight_kg,
            daily_gain_kg: point.daily_gain_kg,
            daily_feed_cost,
            purchase_investment: input.lot.purchase_value,
            feed_investment: cumulative_feed,
            total_investment,
            arroba_per_head,
            mortality_pct,
            surviving_head,
            total_arroba,
            break_even_price,
        });

        entry_arroba = point.end_weight_kg / KG_PER_ARROBA;
    }

    let result = BreakEvenOutput {
        lot_name: input.lot.name.clone(),
        head_count: input.lot.head_count,
        carcass_yield_used: yield_pct,
        rows,
    };

    Ok(with_metadata(
        "Carcass-yield arroba conversion with mortality-adjusted break-even over the projected weight curve",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

type PeriodMap = BTreeMap<(i32, u32), Decimal>;

fn validate_input(input: &BreakEvenInput) -> LivestockFinanceResult<(PeriodMap, PeriodMap)> {
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

    let feed = validation::validate_feed_records(&input.feed_records)?
        .into_iter()
        .map(|r| ((r.year, r.month), r.daily_cost))
        .collect();
    let mortality = validation::validate_mortality_records(&input.mortality_records)?
        .into_iter()
        .map(|r| ((r.year, r.month), r.mortality_pct))
        .collect();

    Ok((feed, mortality))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
