//! Swaption command implementation
//!
//! Prices a European swaption under Black on flat discount, forward and
//! volatility inputs and prints the PV and Greeks.

use pricer_core::market_data::curves::FlatCurve;
use pricer_core::market_data::surfaces::FlatSwaptionVolatility;
use pricer_core::market_data::MarketBundle;
use pricer_core::types::Currency;
use pricer_models::instruments::rates::{
    FixedCouponSwap, Position, Swaption, SwaptionBlackMethod, SwaptionSettlement, SwaptionType,
};
use pricer_models::schedules::Frequency;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Trade and flat market inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SwaptionRequest {
    pub currency: Currency,
    pub notional: Option<f64>,
    pub expiry: f64,
    pub tenor_years: u32,
    pub strike: f64,
    pub fixed_frequency: Frequency,
    pub payer: bool,
    pub short: bool,
    pub cash_settled: bool,
    pub discount_rate: f64,
    pub forward_rate: f64,
    pub volatility: f64,
}

/// Everything the command reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwaptionReport {
    pub forward: f64,
    pub present_value: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub spot_delta: f64,
}

const DISCOUNT: &str = "DSC";
const FORWARD: &str = "FWD";

/// Price the request.
pub fn price(request: &SwaptionRequest, config: &CliConfig) -> Result<SwaptionReport> {
    let bundle = MarketBundle::builder()
        .curve(DISCOUNT, FlatCurve::new(request.discount_rate))
        .curve(FORWARD, FlatCurve::new(request.forward_rate))
        .discount_curve(request.currency, DISCOUNT)
        .swaption_volatility(FlatSwaptionVolatility::new(request.volatility))
        .build()?;

    let swap = FixedCouponSwap::regular(
        request.currency,
        request.notional.unwrap_or(config.default_notional),
        request.expiry.max(0.0),
        request.tenor_years,
        request.fixed_frequency,
        4,
        DISCOUNT,
        FORWARD,
    )?;
    let settlement = if request.cash_settled {
        SwaptionSettlement::Cash {
            settlement_time: request.expiry.max(0.0),
        }
    } else {
        SwaptionSettlement::Physical
    };
    let swaption = Swaption::new(
        swap,
        request.expiry,
        request.strike,
        if request.payer {
            SwaptionType::Payer
        } else {
            SwaptionType::Receiver
        },
        if request.short {
            Position::Short
        } else {
            Position::Long
        },
        settlement,
    )?;
    info!("Pricing {}", swaption);

    let method = SwaptionBlackMethod;
    Ok(SwaptionReport {
        forward: swaption.underlying().par_rate(&bundle)?,
        present_value: method.present_value(&swaption, &bundle)?.amount(),
        delta: method.delta_theoretical(&swaption, &bundle)?,
        gamma: method.gamma_theoretical(&swaption, &bundle)?,
        vega: method.vega_theoretical(&swaption, &bundle)?,
        theta: method.theta_theoretical(&swaption, &bundle)?,
        spot_delta: method.spot_delta_theoretical(&swaption, &bundle)?,
    })
}

/// Run the swaption command
pub fn run(request: &SwaptionRequest, format: &str, config: &CliConfig) -> Result<()> {
    let report = price(request, config)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => {
            println!("\n┌──────────────┬──────────────────────┐");
            for (label, value) in [
                ("Forward", report.forward),
                ("PV", report.present_value),
                ("Delta", report.delta),
                ("Gamma", report.gamma),
                ("Vega", report.vega),
                ("Theta", report.theta),
                ("Spot delta", report.spot_delta),
            ] {
                println!("│ {:<12} │ {:>20.6} │", label, value);
            }
            println!("└──────────────┴──────────────────────┘");
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }
    Ok(())
}
