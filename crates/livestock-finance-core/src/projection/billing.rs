use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LivestockFinanceError;
use crate::types::{
    with_metadata, Arrobas, ComputationOutput, CustomPeriodRecord, GrowthRecord, Kilograms, Lot,
    Money, Percent, KG_PER_ARROBA,
};
use crate::validation;
use crate::LivestockFinanceResult;

use super::break_even::DEFAULT_CARCASS_YIELD_PCT;
use super::weight::{project_weight, WeightProjectionInput};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a lot's gross billing projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingProjectionInput {
    pub lot: Lot,
    pub growth_records: Vec<GrowthRecord>,
    /// Quoted sale price per arroba of carcass weight. Required; kept
    /// optional here so callers can layer a quote over a stored input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arroba_price: Option<Money>,
    /// Carcass yield percentage (0–100]; defaults to 50 when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carcass_yield_pct: Option<Percent>,
    /// Flat daily-gain override forwarded to the weight projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_gain_override: Option<Kilograms>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_periods: Vec<CustomPeriodRecord>,
}

/// Top-level output from `project_billing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingProjectionOutput {
    pub lot_name: String,
    pub head_count: u32,
    pub final_weight_kg: Kilograms,
    pub carcass_weight_kg: Kilograms,
    pub arroba_per_head: Arrobas,
    /// Arrobas per head across the full head count; billing prices the
    /// whole lot, with no mortality adjustment.
    pub total_arrobas: Arrobas,
    pub gross_revenue: Money,
    /// Echoes of the values applied, for pre-fill persistence.
    pub arroba_price_used: Money,
    pub carcass_yield_used: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_gain_used: Option<Kilograms>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the gross revenue from selling a lot at its final projected
/// weight: that weight converts to carcass at the given yield, to arrobas
/// at 15 kg each, and prices at the quoted arroba value over every head.
pub fn project_billing(
    input: &BillingProjectionInput,
) -> LivestockFinanceResult<ComputationOutput<BillingProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let arroba_price = validate_input(input)?;

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

    if projection.result.points.is_empty() {
        return Err(LivestockFinanceError::InsufficientData(format!(
            "lot '{}' has no growth records to project billing from",
            input.lot.name
        )));
    }

    let final_weight = projection.result.final_weight_kg;
    let carcass_weight = final_weight * (yield_pct / Decimal::ONE_HUNDRED);
    let arroba_per_head = carcass_weight / KG_PER_ARROBA;
    let total_arrobas = Decimal::from(input.lot.head_count) * arroba_per_head;
    let gross_revenue = arroba_price * total_arrobas;

    let result = BillingProjectionOutput {
        lot_name: input.lot.name.clone(),
        head_count: input.lot.head_count,
        final_weight_kg: final_weight,
        carcass_weight_kg: carcass_weight,
        arroba_per_head,
        total_arrobas,
        gross_revenue,
        arroba_price_used: arroba_price,
        carcass_yield_used: yield_pct,
        daily_gain_used: input.daily_gain_override,
    };

    Ok(with_metadata(
        "Final projected weight to carcass arrobas, priced at the quoted arroba value over the full head count",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &BillingProjectionInput) -> LivestockFinanceResult<Money> {
    if input.lot.head_count == 0 {
        return Err(LivestockFinanceError::InvalidInput {
            field: "head_count".into(),
            reason: "head count must be at least 1".into(),
        });
    }

    let arroba_price = input
        .arroba_price
        .ok_or_else(|| LivestockFinanceError::InvalidInput {
            field: "arroba_price".into(),
            reason: "a quoted price per arroba is required".into(),
        })?;
    if arroba_price <= Decimal::ZERO {
        return Err(LivestockFinanceError::InvalidInput {
            field: "arroba_price".into(),
            reason: "arroba price must be positive".into(),
        });
    }

    Ok(arroba_price)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> BillingProjectionInput {
        BillingProjectionInput {
            lot: Lot {
                name: "Nelore 2025-A".into(),
                head_count: 200,
                entry_weight_kg: dec!(210),
                entry_weight_arroba: Some(dec!(7)),
                purchase_value: dec!(574_000),
            },
            growth_records: vec![GrowthRecord {
                year: 2025,
                month: 1,
                daily_gain_kg: dec!(0.90),
            }],
            arroba_price: Some(dec!(240)),
            carcass_yield_pct: Some(dec!(50)),
            daily_gain_override: None,
            custom_periods: vec![],
        }
    }

    #[test]
    fn test_billing_reference_values() {
        let output = project_billing(&sample_input()).unwrap();
        let r = &output.result;

        // 210 + 0.90 * 31 = 237.90 kg; carcass 118.950 kg; 7.93 arrobas/head
        assert_eq!(r.final_weight_kg, dec!(237.90));
        assert_eq!(r.carcass_weight_kg, dec!(118.950));
        assert_eq!(r.arroba_per_head, dec!(7.93));
        assert_eq!(r.total_arrobas, dec!(1586.00));
        // 1586.00 arrobas x 240 = 380,640.00
        assert_eq!(r.gross_revenue, dec!(380_640.00));
    }

    #[test]
    fn test_billing_prices_full_head_count() {
        let mut input = sample_input();
        input.lot.head_count = 100;
        let output = project_billing(&input).unwrap();
        assert_eq!(output.result.total_arrobas, dec!(793.00));
    }

    #[test]
    fn test_billing_echoes_inputs_used() {
        let mut input = sample_input();
        input.daily_gain_override = Some(dec!(1.10));
        let output = project_billing(&input).unwrap();
        let r = &output.result;
        assert_eq!(r.arroba_price_used, dec!(240));
        assert_eq!(r.carcass_yield_used, dec!(50));
        assert_eq!(r.daily_gain_used, Some(dec!(1.10)));
    }

    #[test]
    fn test_billing_defaults_yield_with_warning() {
        let mut input = sample_input();
        input.carcass_yield_pct = None;
        let output = project_billing(&input).unwrap();
        assert_eq!(output.result.carcass_yield_used, dec!(50));
        assert!(output.warnings.iter().any(|w| w.contains("defaulting")));
    }

    #[test]
    fn test_billing_requires_growth_records() {
        let mut input = sample_input();
        input.growth_records = vec![];
        let err = project_billing(&input).unwrap_err();
        assert!(matches!(err, LivestockFinanceError::InsufficientData(_)));
    }

    #[test]
    fn test_billing_requires_arroba_price() {
        let mut input = sample_input();
        input.arroba_price = None;
        assert!(project_billing(&input).is_err());

        input.arroba_price = Some(Decimal::ZERO);
        assert!(project_billing(&input).is_err());

        input.arroba_price = Some(dec!(-10));
        assert!(project_billing(&input).is_err());
    }

    #[test]
    fn test_billing_rejects_zero_head() {
        let mut input = sample_input();
        input.lot.head_count = 0;
        assert!(project_billing(&input).is_err());
    }
}
