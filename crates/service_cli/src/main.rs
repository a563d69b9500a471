//! Neutryx CLI - Command Line Pricing for Rates and Credit
//!
//! Operational entry point for the swaption and ISDA CDS pricing methods.
//!
//! # Commands
//!
//! - `pricer grid --grid <csv> --curve <toml>` - Validate an ISDA test grid
//! - `pricer curve --quotes <toml>` - Strip a discount curve from quotes
//! - `pricer cds --trade-date <date> --maturity <date> ...` - Price one CDS
//! - `pricer swaption --expiry <y> --tenor <y> --strike <k> ...` - Price one
//!   swaption and its Greeks
//!
//! # Configuration
//!
//! Solver settings, grid tolerances and the default notional come from
//! `pricer.toml` (see [`config`]) overlaid with `PRICER_` environment
//! variables. Logging honours `RUST_LOG` and is written to stderr.

use std::path::Path;

use clap::{Parser, Subcommand};
use pricer_core::types::{Currency, Date};
use pricer_models::schedules::Frequency;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod staged;

pub use error::{CliError, Result};

use crate::commands::cds::CdsRequest;
use crate::commands::swaption::SwaptionRequest;
use crate::config::CliConfig;

/// Neutryx rates and credit pricing CLI
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pricer.toml")]
    config: String,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reprice an ISDA test grid and check it against the reference upfronts
    Grid {
        /// Test grid CSV file
        #[arg(short, long)]
        grid: String,

        /// Staged discount curve (TOML)
        #[arg(long)]
        curve: String,

        /// Directory of staged hazard curves, hazard_<row>.toml
        #[arg(long)]
        hazard_dir: Option<String>,
    },

    /// Strip an ISDA discount curve from money-market and swap quotes
    Curve {
        /// Quotes file (TOML)
        #[arg(short, long)]
        quotes: String,
    },

    /// Price a single-name CDS from a quoted spread
    Cds {
        /// Trade (pricing) date, YYYY-MM-DD
        #[arg(long)]
        trade_date: Date,

        /// Maturity date, YYYY-MM-DD
        #[arg(long)]
        maturity: Date,

        /// Accrual start date; defaults to maturity less 20 years
        #[arg(long)]
        start_date: Option<Date>,

        /// Running coupon in basis points
        #[arg(long, default_value = "100")]
        coupon: f64,

        /// Quoted par spread in basis points
        #[arg(long)]
        spread: f64,

        /// Recovery rate
        #[arg(long, default_value = "0.4")]
        recovery: f64,

        /// Notional; defaults to the configured notional
        #[arg(long)]
        notional: Option<f64>,

        /// Staged discount curve (TOML)
        #[arg(long, conflicts_with = "rate")]
        curve: Option<String>,

        /// Flat continuous discount rate, instead of a staged curve
        #[arg(long)]
        rate: Option<f64>,
    },

    /// Price a European swaption under Black on flat market data
    Swaption {
        /// Currency of the underlying swap
        #[arg(long, default_value = "USD")]
        currency: Currency,

        /// Notional; defaults to the configured notional
        #[arg(long)]
        notional: Option<f64>,

        /// Option expiry in years
        #[arg(long)]
        expiry: f64,

        /// Underlying swap tenor in whole years
        #[arg(long)]
        tenor: u32,

        /// Strike rate
        #[arg(long)]
        strike: f64,

        /// Fixed leg frequency (annual, semi-annual, quarterly, monthly)
        #[arg(long, default_value = "annual")]
        fixed_frequency: Frequency,

        /// Receiver swaption (default payer)
        #[arg(long)]
        receiver: bool,

        /// Short position (default long)
        #[arg(long)]
        short: bool,

        /// Cash settlement (default physical)
        #[arg(long)]
        cash: bool,

        /// Flat continuous discount rate
        #[arg(long)]
        discount_rate: f64,

        /// Flat continuous forward-projection rate
        #[arg(long)]
        forward_rate: f64,

        /// Flat Black volatility
        #[arg(long)]
        volatility: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    let config = CliConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Grid {
            grid,
            curve,
            hazard_dir,
        } => commands::grid::run(&grid, &curve, hazard_dir.as_deref(), &cli.format, &config)?,
        Commands::Curve { quotes } => commands::curve::run(&quotes, &cli.format, &config)?,
        Commands::Cds {
            trade_date,
            maturity,
            start_date,
            coupon,
            spread,
            recovery,
            notional,
            curve,
            rate,
        } => {
            let request = CdsRequest {
                trade_date,
                maturity,
                start_date,
                coupon_bps: coupon,
                spread_bps: spread,
                recovery_rate: recovery,
                notional,
            };
            commands::cds::run(&request, curve.as_deref(), rate, &cli.format, &config)?
        }
        Commands::Swaption {
            currency,
            notional,
            expiry,
            tenor,
            strike,
            fixed_frequency,
            receiver,
            short,
            cash,
            discount_rate,
            forward_rate,
            volatility,
        } => {
            let request = SwaptionRequest {
                currency,
                notional,
                expiry,
                tenor_years: tenor,
                strike,
                fixed_frequency,
                payer: !receiver,
                short,
                cash_settled: cash,
                discount_rate,
                forward_rate,
                volatility,
            };
            commands::swaption::run(&request, &cli.format, &config)?
        }
    }
    Ok(())
}
