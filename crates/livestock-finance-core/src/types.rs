use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Percentages on the 0–100 scale (mortality, carcass yield).
pub type Percent = Decimal;

/// Live or carcass weight in kilograms.
pub type Kilograms = Decimal;

/// Carcass weight in arrobas (1 arroba = 15 kg).
pub type Arrobas = Decimal;

/// Kilograms per arroba, the cattle-trade carcass unit.
pub const KG_PER_ARROBA: Decimal = dec!(15);

/// A cohort of animals bought, fed, and sold as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    pub name: String,
    pub head_count: u32,
    /// Average live weight per head at entry, in kg.
    pub entry_weight_kg: Kilograms,
    /// Entry weight in arrobas as recorded at purchase; derived from
    /// `entry_weight_kg / 15` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_weight_arroba: Option<Arrobas>,
    /// Total paid for the lot (not per head).
    pub purchase_value: Money,
}

impl Lot {
    /// Entry weight expressed in arrobas, falling back to the kg figure.
    pub fn entry_arroba(&self) -> Arrobas {
        self.entry_weight_arroba
            .unwrap_or(self.entry_weight_kg / KG_PER_ARROBA)
    }
}

/// Average daily weight gain recorded for one lot-month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub year: i32,
    pub month: u32,
    /// Average kg gained per head per day (GMD).
    pub daily_gain_kg: Kilograms,
}

/// Daily feed cost per head recorded for one lot-month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedCostRecord {
    pub year: i32,
    pub month: u32,
    /// Currency spent per head per day.
    pub daily_cost: Money,
}

/// Mortality percentage recorded for one lot-month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortalityRecord {
    pub year: i32,
    pub month: u32,
    /// Share of the lot lost in the month, 0–100.
    pub mortality_pct: Percent,
}

/// Custom accrual period for one lot-month, overriding the calendar
/// day count (e.g. a 15-day partial month at lot entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPeriodRecord {
    pub year: i32,
    pub month: u32,
    pub days: u32,
}

/// Fixed-cost ledger categories tracked per property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedCostCategory {
    Lease,
    Amortization,
    OwnerDraw,
    Maintenance,
    Fuel,
    Labor,
    TechnicalServices,
    Groceries,
    LandTax,
    Freight,
    Utilities,
    Telecom,
    Accounting,
}

/// Revenue categories: the livestock sale classes a property reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueCategory {
    CowSales,
    SteerSales,
    HeiferSales,
    FemaleCalfSales,
    MaleCalfSales,
    YearlingBullSales,
    SilageSales,
}

/// One categorized fixed-cost entry for a property-month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedCostRecord {
    pub category: FixedCostCategory,
    pub year: i32,
    pub month: u32,
    pub amount: Money,
}

/// One categorized revenue entry for a property-month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub category: RevenueCategory,
    pub year: i32,
    pub month: u32,
    pub amount: Money,
}

/// Rates for the variable costs a property does not ledger directly,
/// charged by the cash-flow statement on top of feed. Fractions, not
/// percentages: 0.01 charges 1% of the base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VariableCostRates {
    /// Health and veterinary spend, as a share of feed cost.
    pub health_rate_on_feed: Rate,
    /// Outside services, as a share of revenue.
    pub services_rate_on_revenue: Rate,
    /// Sales taxes, as a share of revenue.
    pub tax_rate_on_revenue: Rate,
}

impl Default for VariableCostRates {
    fn default() -> Self {
        Self {
            health_rate_on_feed: dec!(0.01),
            services_rate_on_revenue: dec!(0.01),
            tax_rate_on_revenue: dec!(0.015),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
