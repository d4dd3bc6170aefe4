mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cash_flow::CashFlowArgs;
use commands::projection::{BillingArgs, BreakEvenArgs, DaysArgs, FeedArgs, WeightArgs};

/// Livestock financial projections for cattle ranches
#[derive(Parser)]
#[command(
    name = "lfa",
    version,
    about = "Livestock financial projections for cattle ranches",
    long_about = "A CLI for cattle-ranch financial projections with decimal precision. \
                  Supports weight-curve projection, feed investment accrual, yield and \
                  break-even analysis, billing projection, and property cash-flow \
                  statements."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a lot's weight curve from monthly daily-gain records
    Weight(WeightArgs),
    /// Accrue a lot's feed spend on top of its purchase value
    Feed(FeedArgs),
    /// Monthly yield and break-even prices over the projected weight curve
    BreakEven(BreakEvenArgs),
    /// Project gross billing at a quoted arroba price
    Billing(BillingArgs),
    /// Build a property's monthly and cumulative cash-flow statement
    CashFlow(CashFlowArgs),
    /// Day count for a calendar month
    Days(DaysArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Weight(args) => commands::projection::run_weight(args),
        Commands::Feed(args) => commands::projection::run_feed(args),
        Commands::BreakEven(args) => commands::projection::run_break_even(args),
        Commands::Billing(args) => commands::projection::run_billing(args),
        Commands::CashFlow(args) => commands::cash_flow::run_cash_flow(args),
        Commands::Days(args) => commands::projection::run_days(args),
        Commands::Version => {
            println!("lfa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
