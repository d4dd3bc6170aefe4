use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::calendar;
use crate::error::LivestockFinanceError;
use crate::types::{
    with_metadata, Arrobas, ComputationOutput, CustomPeriodRecord, GrowthRecord, Kilograms, Lot,
    KG_PER_ARROBA,
};
use crate::validation;
use crate::LivestockFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a lot's weight projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightProjectionInput {
    pub lot: Lot,
    pub growth_records: Vec<GrowthRecord>,
    /// Flat daily-gain override: when set, every month accrues at this rate
    /// instead of its recorded one, supporting "what-if" runs without
    /// touching stored records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_gain_override: Option<Kilograms>,
    /// Custom accrual day counts keyed by (year, month); calendar counts
    /// apply to months not listed here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_periods: Vec<CustomPeriodRecord>,
}

/// Top-level output from `project_weight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightProjectionOutput {
    pub lot_name: String,
    pub entry_weight_kg: Kilograms,
    pub points: Vec<WeightPoint>,
    pub final_weight_kg: Kilograms,
    /// Live-weight arroba equivalent of the final weight.
    pub final_weight_arroba: Arrobas,
    pub total_gain_kg: Kilograms,
    /// Echo of the flat rate applied, for the caller's pre-fill persistence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_gain_used: Option<Kilograms>,
}

/// One month on the projected weight curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days: u32,
    /// The rate this month actually accrued at (override or recorded).
    pub daily_gain_kg: Kilograms,
    pub gain_kg: Kilograms,
    pub start_weight_kg: Kilograms,
    pub end_weight_kg: Kilograms,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project a lot's weight curve by chaining monthly daily-gain records onto
/// the entry weight, in ascending (year, month) order across year
/// boundaries. Months without a record are skipped, never zero-filled.
pub fn project_weight(
    input: &WeightProjectionInput,
) -> LivestockFinanceResult<ComputationOutput<WeightProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let records = validate_input(input)?;
    let custom_days = custom_day_map(&input.custom_periods, &mut warnings)?;

    let mut points: Vec<WeightPoint> = Vec::with_capacity(records.len());
    let mut accumulated = input.lot.entry_weight_kg;

    for record in &records {
        let days = calendar::effective_days(
            record.year,
            record.month,
            custom_days.get(&(record.year, record.month)).copied(),
        )?;

        let rate = input.daily_gain_override.unwrap_or(record.daily_gain_kg);
        let gain = rate * Decimal::from(days);
        let start_weight = accumulated;
        accumulated += gain;

        points.push(WeightPoint {
            year: record.year,
            month: record.month,
            label: calendar::month_label(record.year, record.month)?,
            days,
            daily_gain_kg: rate,
            gain_kg: gain,
            start_weight_kg: start_weight,
            end_weight_kg: accumulated,
        });
    }

    let result = WeightProjectionOutput {
        lot_name: input.lot.name.clone(),
        entry_weight_kg: input.lot.entry_weight_kg,
        final_weight_kg: accumulated,
        final_weight_arroba: accumulated / KG_PER_ARROBA,
        total_gain_kg: accumulated - input.lot.entry_weight_kg,
        daily_gain_used: input.daily_gain_override,
        points,
    };

    Ok(with_metadata(
        "Entry weight plus month-chained GMD accrual over effective day counts",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &WeightProjectionInput) -> LivestockFinanceResult<Vec<GrowthRecord>> {
    if input.lot.entry_weight_kg < Decimal::ZERO {
        return Err(LivestockFinanceError::InvalidInput {
            field: "entry_weight_kg".into(),
            reason: "entry weight must be >= 0".into(),
        });
    }
    if let Some(rate) = input.daily_gain_override {
        if rate < Decimal::ZERO {
            return Err(LivestockFinanceError::InvalidInput {
                field: "daily_gain_override".into(),
                reason: "override rate must be >= 0".into(),
            });
        }
    }
    validation::validate_growth_records(&input.growth_records)
}

/// Build the (year, month) → days lookup, warning when a custom period
/// exceeds its calendar month.
pub(crate) fn custom_day_map(
    periods: &[CustomPeriodRecord],
    warnings: &mut Vec<String>,
) -> LivestockFinanceResult<BTreeMap<(i32, u32), u32>> {
    let validated = validation::validate_custom_periods(periods)?;
    let mut map = BTreeMap::new();
    for p in &validated {
        let calendar_days = calendar::days_in_month(p.year, p.month)?;
        if p.days > calendar_days {
            warnings.push(format!(
                "custom period of {} days for {} exceeds the {}-day calendar month",
                p.days,
                calendar::month_label(p.year, p.month)?,
                calendar_days,
            ));
        }
        map.insert((p.year, p.month), p.days);
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_lot() -> Lot {
        Lot {
            name: "Nelore 2025".into(),
            head_count: 200,
            entry_weight_kg: dec!(210.00),
            entry_weight_arroba: Some(dec!(7.00)),
            purchase_value: dec!(574_000.00),
        }
    }

    fn sample_input() -> WeightProjectionInput {
        WeightProjectionInput {
            lot: sample_lot(),
            growth_records: vec![
                GrowthRecord { year: 2025, month: 1, daily_gain_kg: dec!(0.90) },
                GrowthRecord { year: 2025, month: 2, daily_gain_kg: dec!(0.85) },
            ],
            daily_gain_override: None,
            custom_periods: vec![],
        }
    }

    #[test]
    fn test_january_gain_over_31_days() {
        let result = project_weight(&sample_input()).unwrap();
        let jan = &result.result.points[0];
        // 210.00 + 0.90 * 31 = 237.90
        assert_eq!(jan.days, 31);
        assert_eq!(jan.gain_kg, dec!(27.90));
        assert_eq!(jan.end_weight_kg, dec!(237.90));
        assert_eq!(jan.label, "jan/2025");
    }

    #[test]
    fn test_chain_carries_into_next_month() {
        let result = project_weight(&sample_input()).unwrap();
        let feb = &result.result.points[1];
        // February 2025 has 28 days: 237.90 + 0.85 * 28 = 261.70
        assert_eq!(feb.start_weight_kg, dec!(237.90));
        assert_eq!(feb.end_weight_kg, dec!(261.70));
        assert_eq!(result.result.final_weight_kg, dec!(261.70));
        assert_eq!(result.result.total_gain_kg, dec!(51.70));
    }

    #[test]
    fn test_gap_months_are_skipped_not_zero_filled() {
        let mut input = sample_input();
        input.growth_records = vec![
            GrowthRecord { year: 2025, month: 1, daily_gain_kg: dec!(0.90) },
            GrowthRecord { year: 2025, month: 3, daily_gain_kg: dec!(1.00) },
        ];
        let result = project_weight(&input).unwrap();
        assert_eq!(result.result.points.len(), 2);
        // March picks up exactly where January ended
        assert_eq!(result.result.points[1].start_weight_kg, dec!(237.90));
        assert_eq!(result.result.points[1].end_weight_kg, dec!(237.90) + dec!(31));
    }

    #[test]
    fn test_chains_across_year_boundary() {
        let mut input = sample_input();
        input.growth_records = vec![
            GrowthRecord { year: 2024, month: 12, daily_gain_kg: dec!(1.00) },
            GrowthRecord { year: 2025, month: 1, daily_gain_kg: dec!(1.00) },
        ];
        let result = project_weight(&input).unwrap();
        assert_eq!(result.result.points[0].label, "dec/2024");
        assert_eq!(result.result.points[1].start_weight_kg, dec!(241.00));
        assert_eq!(result.result.final_weight_kg, dec!(272.00));
    }

    #[test]
    fn test_override_replaces_every_recorded_rate() {
        let mut input = sample_input();
        input.daily_gain_override = Some(dec!(1.10));
        let result = project_weight(&input).unwrap();
        for point in &result.result.points {
            assert_eq!(point.daily_gain_kg, dec!(1.10));
        }
        assert_eq!(result.result.daily_gain_used, Some(dec!(1.10)));
    }

    #[test]
    fn test_no_records_yields_empty_sequence() {
        let mut input = sample_input();
        input.growth_records = vec![];
        let result = project_weight(&input).unwrap();
        assert!(result.result.points.is_empty());
        assert_eq!(result.result.final_weight_kg, dec!(210.00));
        assert_eq!(result.result.total_gain_kg, Decimal::ZERO);
    }

    #[test]
    fn test_output_is_sorted_and_non_decreasing() {
        let mut input = sample_input();
        input.growth_records = vec![
            GrowthRecord { year: 2025, month: 3, daily_gain_kg: dec!(0.2) },
            GrowthRecord { year: 2024, month: 11, daily_gain_kg: dec!(0) },
            GrowthRecord { year: 2025, month: 1, daily_gain_kg: dec!(0.9) },
        ];
        let result = project_weight(&input).unwrap();
        let points = &result.result.points;
        for pair in points.windows(2) {
            assert!((pair[0].year, pair[0].month) < (pair[1].year, pair[1].month));
            assert!(pair[0].end_weight_kg <= pair[1].end_weight_kg);
        }
    }

    #[test]
    fn test_custom_period_shortens_accrual() {
        let mut input = sample_input();
        input.growth_records =
            vec![GrowthRecord { year: 2025, month: 1, daily_gain_kg: dec!(0.90) }];
        input.custom_periods = vec![CustomPeriodRecord { year: 2025, month: 1, days: 15 }];
        let result = project_weight(&input).unwrap();
        // 210.00 + 0.90 * 15 = 223.50
        assert_eq!(result.result.points[0].days, 15);
        assert_eq!(result.result.final_weight_kg, dec!(223.50));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_custom_period_longer_than_month_warns() {
        let mut input = sample_input();
        input.growth_records =
            vec![GrowthRecord { year: 2025, month: 2, daily_gain_kg: dec!(1.00) }];
        input.custom_periods = vec![CustomPeriodRecord { year: 2025, month: 2, days: 45 }];
        let result = project_weight(&input).unwrap();
        assert_eq!(result.result.final_weight_kg, dec!(255.00));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("45 days"));
    }

    #[test]
    fn test_negative_recorded_rate_rejected() {
        let mut input = sample_input();
        input.growth_records =
            vec![GrowthRecord { year: 2025, month: 1, daily_gain_kg: dec!(-0.1) }];
        assert!(project_weight(&input).is_err());
    }

    #[test]
    fn test_negative_override_rejected() {
        let mut input = sample_input();
        input.daily_gain_override = Some(dec!(-0.5));
        assert!(project_weight(&input).is_err());
    }
}
