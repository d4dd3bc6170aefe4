use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use livestock_finance_core::calendar;
use livestock_finance_core::projection::billing::{self, BillingProjectionInput};
use livestock_finance_core::projection::break_even::{self, BreakEvenInput};
use livestock_finance_core::projection::feed::{self, FeedAccrualInput};
use livestock_finance_core::projection::weight::{self, WeightProjectionInput};

use crate::input;

/// Arguments for weight projection
#[derive(Args)]
pub struct WeightArgs {
    /// Path to JSON or YAML input file with the lot and its growth records
    #[arg(long)]
    pub input: Option<String>,

    /// Flat daily gain in kg/day, applied to every month instead of the
    /// recorded rates
    #[arg(long)]
    pub daily_gain: Option<Decimal>,
}

/// Arguments for feed investment accrual
#[derive(Args)]
pub struct FeedArgs {
    /// Path to JSON or YAML input file with the lot and its feed records
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for yield and break-even analysis
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Path to JSON or YAML input file with the lot and its record series
    #[arg(long)]
    pub input: Option<String>,

    /// Flat daily gain in kg/day for what-if runs
    #[arg(long)]
    pub daily_gain: Option<Decimal>,

    /// Carcass yield percentage (0-100]
    #[arg(long)]
    pub carcass_yield: Option<Decimal>,
}

/// Arguments for billing projection
#[derive(Args)]
pub struct BillingArgs {
    /// Path to JSON or YAML input file with the lot and its growth records
    #[arg(long)]
    pub input: Option<String>,

    /// Quoted sale price per arroba
    #[arg(long)]
    pub arroba_price: Option<Decimal>,

    /// Carcass yield percentage (0-100]
    #[arg(long)]
    pub carcass_yield: Option<Decimal>,

    /// Flat daily gain in kg/day for what-if runs
    #[arg(long)]
    pub daily_gain: Option<Decimal>,
}

/// Arguments for the month day-count helper
#[derive(Args)]
pub struct DaysArgs {
    /// Calendar year (1900-2200)
    #[arg(long)]
    pub year: i32,

    /// Calendar month (1-12)
    #[arg(long)]
    pub month: u32,
}

pub fn run_weight(args: WeightArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut weight_input: WeightProjectionInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped JSON on stdin is required".into());
    };

    if args.daily_gain.is_some() {
        weight_input.daily_gain_override = args.daily_gain;
    }

    let result = weight::project_weight(&weight_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_feed(args: FeedArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let feed_input: FeedAccrualInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped JSON on stdin is required".into());
    };

    let result = feed::accrue_feed_investment(&feed_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut break_even_input: BreakEvenInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped JSON on stdin is required".into());
    };

    if args.daily_gain.is_some() {
        break_even_input.daily_gain_override = args.daily_gain;
    }
    if args.carcass_yield.is_some() {
        break_even_input.carcass_yield_pct = args.carcass_yield;
    }

    let result = break_even::analyze_break_even(&break_even_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_billing(args: BillingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut billing_input: BillingProjectionInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped JSON on stdin is required".into());
    };

    if args.arroba_price.is_some() {
        billing_input.arroba_price = args.arroba_price;
    }
    if args.carcass_yield.is_some() {
        billing_input.carcass_yield_pct = args.carcass_yield;
    }
    if args.daily_gain.is_some() {
        billing_input.daily_gain_override = args.daily_gain;
    }

    let result = billing::project_billing(&billing_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_days(args: DaysArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let days = calendar::days_in_month(args.year, args.month)?;
    Ok(serde_json::json!({
        "year": args.year,
        "month": args.month,
        "label": calendar::month_label(args.year, args.month)?,
        "days": days,
    }))
}
