use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use livestock_finance_core::cash_flow::statement::{self, CashFlowInput};

use crate::input;

/// Arguments for the property cash-flow statement
#[derive(Args)]
pub struct CashFlowArgs {
    /// Path to JSON or YAML input file with the property's lots and ledgers
    #[arg(long)]
    pub input: Option<String>,

    /// Statement year, replacing the one in the input file
    #[arg(long)]
    pub year: Option<i32>,

    /// Health/vet spend as a fraction of feed cost (default 0.01)
    #[arg(long)]
    pub health_rate: Option<Decimal>,

    /// Outside services as a fraction of revenue (default 0.01)
    #[arg(long)]
    pub services_rate: Option<Decimal>,

    /// Sales taxes as a fraction of revenue (default 0.015)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,
}

pub fn run_cash_flow(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut cash_flow_input: CashFlowInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped JSON on stdin is required".into());
    };

    if let Some(year) = args.year {
        cash_flow_input.year = year;
    }
    if args.health_rate.is_some() || args.services_rate.is_some() || args.tax_rate.is_some() {
        let mut rates = cash_flow_input.variable_cost_rates.unwrap_or_default();
        if let Some(rate) = args.health_rate {
            rates.health_rate_on_feed = rate;
        }
        if let Some(rate) = args.services_rate {
            rates.services_rate_on_revenue = rate;
        }
        if let Some(rate) = args.tax_rate {
            rates.tax_rate_on_revenue = rate;
        }
        cash_flow_input.variable_cost_rates = Some(rates);
    }

    let result = statement::build_cash_flow(&cash_flow_input)?;
    Ok(serde_json::to_value(result)?)
}
