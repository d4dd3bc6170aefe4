use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calendar;
use crate::error::LivestockFinanceError;
use crate::types::{
    with_metadata, ComputationOutput, FeedCostRecord, FixedCostRecord, Lot, Money, Percent,
    RevenueRecord, VariableCostRates,
};
use crate::validation;
use crate::LivestockFinanceResult;

/// Leading months rolled into the annual summary. December is carried in
/// the monthly and cumulative series but stays outside the summary window.
pub const SUMMARY_WINDOW_MONTHS: u32 = 11;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One lot and its feed series, feeding the property statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotFeedSeries {
    pub lot: Lot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feed_records: Vec<FeedCostRecord>,
}

/// Input for a property's annual cash-flow statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowInput {
    /// Statement year; records outside it are ignored.
    pub year: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lots: Vec<LotFeedSeries>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revenue_records: Vec<RevenueRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_cost_records: Vec<FixedCostRecord>,
    /// Variable-cost heuristic rates; the defaults apply when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_cost_rates: Option<VariableCostRates>,
}

/// Top-level output from `build_cash_flow`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowOutput {
    pub year: i32,
    /// Sum of every lot's purchase value, the period-0 outflow.
    pub initial_investment: Money,
    /// Cumulative cash flow at month 0, before any operating month.
    pub opening_cumulative_cash_flow: Money,
    pub months: Vec<CashFlowMonth>,
    pub summary: AnnualSummary,
}

/// One operating month of the statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowMonth {
    pub month: u32,
    pub label: String,
    pub revenue: Money,
    pub fixed_cost: Money,
    /// Sum over lots of daily feed cost x calendar days x head count.
    pub feed_cost: Money,
    pub health_cost: Money,
    pub services_cost: Money,
    pub tax_cost: Money,
    pub variable_cost: Money,
    pub free_cash_flow: Money,
    pub cumulative_cash_flow: Money,
}

/// Year-level rollup over the summary window plus the initial investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// Number of leading months rolled up here.
    pub months_covered: u32,
    pub investment: Money,
    pub fixed_costs: Money,
    pub variable_costs: Money,
    /// Investment plus all costs over the window.
    pub total_outlay: Money,
    pub revenue: Money,
    /// Revenue minus total outlay.
    pub result: Money,
    /// Result over investment; zero when nothing was invested.
    pub return_on_investment_pct: Percent,
    /// Result over revenue; zero when nothing was sold.
    pub profit_margin_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build a property's monthly and cumulative free-cash-flow statement for
/// one year. Cumulative flow is seeded at month 0 with the livestock
/// purchase investment as an outflow; feed spend accrues at calendar day
/// counts; health, services, and tax costs are charged at heuristic rates
/// on feed and revenue.
pub fn build_cash_flow(
    input: &CashFlowInput,
) -> LivestockFinanceResult<ComputationOutput<CashFlowOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;
    let rates = input.variable_cost_rates.unwrap_or_default();

    warnings.push(format!(
        "annual summary covers months 1-{SUMMARY_WINDOW_MONTHS}; December is reported monthly but not summarized"
    ));

    let initial_investment: Money = input.lots.iter().map(|s| s.lot.purchase_value).sum();

    // Bucket the year's records per month; other years fall out here.
    let mut feed_by_month = [Decimal::ZERO; 12];
    for series in &input.lots {
        let head = Decimal::from(series.lot.head_count);
        for record in &series.feed_records {
            if record.year != input.year {
                continue;
            }
            let days = calendar::days_in_month(record.year, record.month)?;
            feed_by_month[(record.month - 1) as usize] +=
                record.daily_cost * Decimal::from(days) * head;
        }
    }

    let mut revenue_by_month = [Decimal::ZERO; 12];
    for record in &input.revenue_records {
        if record.year == input.year {
            revenue_by_month[(record.month - 1) as usize] += record.amount;
        }
    }

    let mut fixed_by_month = [Decimal::ZERO; 12];
    for record in &input.fixed_cost_records {
        if record.year == input.year {
            fixed_by_month[(record.month - 1) as usize] += record.amount;
        }
    }

    let opening_cumulative = -initial_investment;
    let mut cumulative = opening_cumulative;
    let mut months: Vec<CashFlowMonth> = Vec::with_capacity(12);

    for month in 1..=12u32 {
        let idx = (month - 1) as usize;
        let revenue = revenue_by_month[idx];
        let fixed_cost = fixed_by_month[idx];
        let feed_cost = feed_by_month[idx];

        let health_cost = feed_cost * rates.health_rate_on_feed;
        let services_cost = revenue * rates.services_rate_on_revenue;
        let tax_cost = revenue * rates.tax_rate_on_revenue;
        let variable_cost = feed_cost + health_cost + services_cost + tax_cost;

        let free_cash_flow = revenue - fixed_cost - variable_cost;
        cumulative += free_cash_flow;

        months.push(CashFlowMonth {
            month,
            label: calendar::month_label(input.year, month)?,
            revenue,
            fixed_cost,
            feed_cost,
            health_cost,
            services_cost,
            tax_cost,
            variable_cost,
            free_cash_flow,
            cumulative_cash_flow: cumulative,
        });
    }

    let summary = build_summary(initial_investment, &months);

    let result = CashFlowOutput {
        year: input.year,
        initial_investment,
        opening_cumulative_cash_flow: opening_cumulative,
        months,
        summary,
    };

    Ok(with_metadata(
        "Monthly free cash flow over categorized revenue and costs, seeded with the livestock purchase investment",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn build_summary(initial_investment: Money, months: &[CashFlowMonth]) -> AnnualSummary {
    let window = &months[..SUMMARY_WINDOW_MONTHS as usize];
    let fixed_costs: Money = window.iter().map(|m| m.fixed_cost).sum();
    let variable_costs: Money = window.iter().map(|m| m.variable_cost).sum();
    let revenue: Money = window.iter().map(|m| m.revenue).sum();

    let total_outlay = initial_investment + fixed_costs + variable_costs;
    let result = revenue - total_outlay;

    let return_on_investment_pct = if initial_investment > Decimal::ZERO {
        result / initial_investment * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let profit_margin_pct = if revenue > Decimal::ZERO {
        result / revenue * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    AnnualSummary {
        months_covered: SUMMARY_WINDOW_MONTHS,
        investment: initial_investment,
        fixed_costs,
        variable_costs,
        total_outlay,
        revenue,
        result,
        return_on_investment_pct,
        profit_margin_pct,
    }
}

fn validate_input(input: &CashFlowInput) -> LivestockFinanceResult<()> {
    // The statement year itself must be a representable period.
    calendar::days_in_month(input.year, 1)?;

    for series in &input.lots {
        if series.lot.head_count == 0 {
            return Err(LivestockFinanceError::InvalidInput {
                field: "head_count".into(),
                reason: format!("lot '{}' must have at least 1 head", series.lot.name),
            });
        }
        if series.lot.purchase_value < Decimal::ZERO {
            return Err(LivestockFinanceError::InvalidInput {
                field: "purchase_value".into(),
                reason: format!("lot '{}' purchase value must be >= 0", series.lot.name),
            });
        }
        validation::validate_feed_records(&series.feed_records)?;
    }

    validation::validate_revenue_records(&input.revenue_records)?;
    validation::validate_fixed_cost_records(&input.fixed_cost_records)?;

    if let Some(rates) = input.variable_cost_rates {
        validate_rate(rates.health_rate_on_feed, "health_rate_on_feed")?;
        validate_rate(rates.services_rate_on_revenue, "services_rate_on_revenue")?;
        validate_rate(rates.tax_rate_on_revenue, "tax_rate_on_revenue")?;
    }

    Ok(())
}

fn validate_rate(rate: Decimal, field: &str) -> LivestockFinanceResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(LivestockFinanceError::InvalidInput {
            field: field.into(),
            reason: "rate must be between 0 and 1".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
