use livestock_finance_core::cash_flow::statement::{self, CashFlowInput, LotFeedSeries};
use livestock_finance_core::types::{
    FeedCostRecord, FixedCostCategory, FixedCostRecord, Lot, RevenueCategory, RevenueRecord,
    VariableCostRates,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn lot(name: &str, head_count: u32, purchase_value: Decimal) -> Lot {
    Lot {
        name: name.into(),
        head_count,
        entry_weight_kg: dec!(210),
        entry_weight_arroba: None,
        purchase_value,
    }
}

fn revenue(category: RevenueCategory, month: u32, amount: Decimal) -> RevenueRecord {
    RevenueRecord {
        category,
        year: 2025,
        month,
        amount,
    }
}

fn fixed(category: FixedCostCategory, month: u32, amount: Decimal) -> FixedCostRecord {
    FixedCostRecord {
        category,
        year: 2025,
        month,
        amount,
    }
}

// ===========================================================================
// Idle-property tests
// ===========================================================================

#[test]
fn test_idle_property_holds_purchase_outflow() {
    // One lot bought for 100,000, nothing else recorded all year: the
    // cumulative line opens at -100,000 and never moves.
    let input = CashFlowInput {
        year: 2025,
        lots: vec![LotFeedSeries {
            lot: lot("Pasture 1", 50, dec!(100_000)),
            feed_records: vec![],
        }],
        revenue_records: vec![],
        fixed_cost_records: vec![],
        variable_cost_rates: None,
    };
    let output = statement::build_cash_flow(&input).unwrap();
    let r = &output.result;

    assert_eq!(r.opening_cumulative_cash_flow, dec!(-100_000));
    assert_eq!(r.months.len(), 12);
    for month in &r.months {
        assert_eq!(month.free_cash_flow, Decimal::ZERO);
        assert_eq!(month.cumulative_cash_flow, dec!(-100_000));
    }

    // The year's bottom line is the unrecovered investment.
    assert_eq!(r.summary.result, dec!(-100_000));
    assert_eq!(r.summary.return_on_investment_pct, dec!(-100));
    assert_eq!(r.summary.profit_margin_pct, Decimal::ZERO);
}

#[test]
fn test_empty_property_yields_zeroed_statement() {
    let input = CashFlowInput {
        year: 2025,
        lots: vec![],
        revenue_records: vec![],
        fixed_cost_records: vec![],
        variable_cost_rates: None,
    };
    let output = statement::build_cash_flow(&input).unwrap();
    let r = &output.result;
    assert_eq!(r.initial_investment, Decimal::ZERO);
    assert_eq!(r.months.len(), 12);
    assert!(r.months.iter().all(|m| m.free_cash_flow == Decimal::ZERO));
}

// ===========================================================================
// Operating-year tests
// ===========================================================================

#[test]
fn test_operating_month_composition() {
    // January: 9,300 of feed, 50,000 of sales, 6,200 of fixed costs.
    // Variable = 9,300 + 93 (health) + 500 (services) + 750 (tax) = 10,643.
    let input = CashFlowInput {
        year: 2025,
        lots: vec![LotFeedSeries {
            lot: lot("Nelore 2025-A", 200, dec!(574_000)),
            feed_records: vec![FeedCostRecord {
                year: 2025,
                month: 1,
                daily_cost: dec!(1.50),
            }],
        }],
        revenue_records: vec![
            revenue(RevenueCategory::CowSales, 1, dec!(30_000)),
            revenue(RevenueCategory::SteerSales, 1, dec!(20_000)),
        ],
        fixed_cost_records: vec![
            fixed(FixedCostCategory::Lease, 1, dec!(5_000)),
            fixed(FixedCostCategory::Fuel, 1, dec!(1_200)),
        ],
        variable_cost_rates: None,
    };
    let output = statement::build_cash_flow(&input).unwrap();
    let jan = &output.result.months[0];

    assert_eq!(jan.feed_cost, dec!(9_300.00));
    assert_eq!(jan.variable_cost, dec!(10_643.00));
    assert_eq!(jan.free_cash_flow, dec!(33_157.00));
    assert_eq!(jan.cumulative_cash_flow, dec!(-540_843.00));
}

#[test]
fn test_revenue_categories_sum_per_month() {
    // Every sale class recorded in one month lands in that month's total.
    let input = CashFlowInput {
        year: 2025,
        lots: vec![],
        revenue_records: vec![
            revenue(RevenueCategory::CowSales, 5, dec!(10_000)),
            revenue(RevenueCategory::SteerSales, 5, dec!(12_000)),
            revenue(RevenueCategory::HeiferSales, 5, dec!(8_000)),
            revenue(RevenueCategory::FemaleCalfSales, 5, dec!(4_000)),
            revenue(RevenueCategory::MaleCalfSales, 5, dec!(4_500)),
            revenue(RevenueCategory::YearlingBullSales, 5, dec!(6_000)),
            revenue(RevenueCategory::SilageSales, 5, dec!(1_500)),
        ],
        fixed_cost_records: vec![],
        variable_cost_rates: None,
    };
    let output = statement::build_cash_flow(&input).unwrap();
    assert_eq!(output.result.months[4].revenue, dec!(46_000));
    // Months without sales stay at zero rather than inheriting May's.
    assert_eq!(output.result.months[5].revenue, Decimal::ZERO);
}

#[test]
fn test_cumulative_chains_through_the_year() {
    let input = CashFlowInput {
        year: 2025,
        lots: vec![LotFeedSeries {
            lot: lot("Nelore 2025-A", 100, dec!(300_000)),
            feed_records: vec![],
        }],
        revenue_records: vec![
            revenue(RevenueCategory::SteerSales, 2, dec!(40_000)),
            revenue(RevenueCategory::SteerSales, 7, dec!(60_000)),
        ],
        fixed_cost_records: vec![fixed(FixedCostCategory::Labor, 4, dec!(9_000))],
        variable_cost_rates: None,
    };
    let output = statement::build_cash_flow(&input).unwrap();
    let months = &output.result.months;

    let mut expected = dec!(-300_000);
    for month in months {
        expected += month.free_cash_flow;
        assert_eq!(month.cumulative_cash_flow, expected);
    }
    // 2.5% of each sale leaks to services and taxes.
    let feb_net = dec!(40_000) - dec!(40_000) * dec!(0.025);
    assert_eq!(months[1].free_cash_flow, feb_net);
}

#[test]
fn test_annual_summary_windows_eleven_months() {
    // A December sale shows in the monthly series but not the summary.
    let input = CashFlowInput {
        year: 2025,
        lots: vec![],
        revenue_records: vec![
            revenue(RevenueCategory::CowSales, 6, dec!(25_000)),
            revenue(RevenueCategory::CowSales, 12, dec!(70_000)),
        ],
        fixed_cost_records: vec![fixed(FixedCostCategory::Lease, 12, dec!(3_000))],
        variable_cost_rates: None,
    };
    let output = statement::build_cash_flow(&input).unwrap();
    let r = &output.result;

    assert_eq!(r.summary.months_covered, 11);
    assert_eq!(r.summary.revenue, dec!(25_000));
    assert_eq!(r.summary.fixed_costs, Decimal::ZERO);
    assert_eq!(r.months[11].revenue, dec!(70_000));
    assert!(output.warnings.iter().any(|w| w.contains("December")));
}

#[test]
fn test_custom_heuristic_rates_apply() {
    let input = CashFlowInput {
        year: 2025,
        lots: vec![LotFeedSeries {
            lot: lot("Nelore 2025-A", 200, dec!(574_000)),
            feed_records: vec![FeedCostRecord {
                year: 2025,
                month: 1,
                daily_cost: dec!(1.50),
            }],
        }],
        revenue_records: vec![revenue(RevenueCategory::CowSales, 1, dec!(50_000))],
        fixed_cost_records: vec![],
        variable_cost_rates: Some(VariableCostRates {
            health_rate_on_feed: dec!(0.02),
            services_rate_on_revenue: dec!(0.005),
            tax_rate_on_revenue: dec!(0.02),
        }),
    };
    let output = statement::build_cash_flow(&input).unwrap();
    let jan = &output.result.months[0];
    assert_eq!(jan.health_cost, dec!(186.0000));
    assert_eq!(jan.services_cost, dec!(250.000));
    assert_eq!(jan.tax_cost, dec!(1_000.00));
}

#[test]
fn test_statement_is_deterministic() {
    let input = CashFlowInput {
        year: 2025,
        lots: vec![LotFeedSeries {
            lot: lot("Nelore 2025-A", 200, dec!(574_000)),
            feed_records: vec![FeedCostRecord {
                year: 2025,
                month: 3,
                daily_cost: dec!(1.75),
            }],
        }],
        revenue_records: vec![revenue(RevenueCategory::SteerSales, 9, dec!(120_000))],
        fixed_cost_records: vec![fixed(FixedCostCategory::Maintenance, 2, dec!(2_500))],
        variable_cost_rates: None,
    };
    let first = statement::build_cash_flow(&input).unwrap();
    let second = statement::build_cash_flow(&input).unwrap();
    assert_eq!(
        serde_json::to_string(&first.result).unwrap(),
        serde_json::to_string(&second.result).unwrap()
    );
}
