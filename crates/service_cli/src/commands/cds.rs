//! CDS command implementation
//!
//! Prices one CDS under the ISDA standard model from a staged discount
//! curve (or a flat rate) and a quoted spread.

use std::path::Path;

use pricer_core::market_data::curves::IsdaCurve;
use pricer_core::types::{Date, HolidayCalendar, WeekendCalendar};
use pricer_models::instruments::credit::{CdsDates, IsdaCdsDefinition, IsdaCdsMethod};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::staged::StagedCurve;
use crate::{CliError, Result};

/// Terms of the contract to price.
#[derive(Debug, Clone, PartialEq)]
pub struct CdsRequest {
    pub trade_date: Date,
    pub maturity: Date,
    pub start_date: Option<Date>,
    pub coupon_bps: f64,
    pub spread_bps: f64,
    pub recovery_rate: f64,
    pub notional: Option<f64>,
}

/// Everything the command reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdsReport {
    pub dirty_upfront: f64,
    pub clean_upfront: f64,
    pub accrued: f64,
    pub protection_leg: f64,
    pub premium_leg: f64,
    pub hazard_rate: f64,
    pub par_spread: f64,
}

/// Price the request against `discount`.
pub fn price(request: &CdsRequest, discount: &IsdaCurve, config: &CliConfig) -> Result<CdsReport> {
    let calendar = HolidayCalendar::new("MondayToFriday", []);
    let start = match request.start_date {
        Some(date) => date,
        None => IsdaCdsDefinition::default_start_date(request.maturity, &calendar)?,
    };
    let cds = IsdaCdsDefinition::builder(start, request.maturity)
        .notional(request.notional.unwrap_or(config.default_notional))
        .coupon(request.coupon_bps / 10_000.0)
        .recovery_rate(request.recovery_rate)
        .calendar(calendar)
        .build()?;
    let dates = CdsDates::standard(request.trade_date, &WeekendCalendar);
    let method = IsdaCdsMethod::new(config.solver_config());

    let spread = request.spread_bps / 10_000.0;
    let hazard_rate = method.hazard_rate_from_spread(&cds, discount, spread, &dates)?;
    let hazard = IsdaCurve::flat("HAZARD", hazard_rate)?;

    let dirty_upfront = method.upfront_charge(&cds, discount, &hazard, &dates, false)?;
    let clean_upfront = method.upfront_charge(&cds, discount, &hazard, &dates, true)?;
    Ok(CdsReport {
        dirty_upfront,
        clean_upfront,
        accrued: clean_upfront - dirty_upfront,
        protection_leg: method.protection_leg(&cds, discount, &hazard, &dates)?,
        premium_leg: method.premium_leg(&cds, discount, &hazard, &dates, false)?,
        hazard_rate,
        par_spread: method.par_spread(&cds, discount, &hazard, &dates)?,
    })
}

/// Run the cds command
pub fn run(
    request: &CdsRequest,
    curve: Option<&str>,
    flat_rate: Option<f64>,
    format: &str,
    config: &CliConfig,
) -> Result<()> {
    let discount = match (curve, flat_rate) {
        (Some(path), _) => StagedCurve::from_path(Path::new(path))?.build("IR_CURVE")?,
        (None, Some(rate)) => IsdaCurve::flat("IR_CURVE", rate)?,
        (None, None) => {
            return Err(CliError::InvalidArgument(
                "either --curve or --rate is required".to_string(),
            ))
        }
    };
    info!(
        "Pricing CDS {} -> {} at {}bp",
        request.trade_date, request.maturity, request.spread_bps
    );

    let report = price(request, &discount, config)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => {
            println!("\n┌──────────────────┬──────────────────────┐");
            for (label, value) in [
                ("Dirty upfront", report.dirty_upfront),
                ("Clean upfront", report.clean_upfront),
                ("Accrued", report.accrued),
                ("Protection leg", report.protection_leg),
                ("Premium leg", report.premium_leg),
                ("Hazard rate", report.hazard_rate),
                ("Par spread", report.par_spread),
            ] {
                println!("│ {:<16} │ {:>20.6} │", label, value);
            }
            println!("└──────────────────┴──────────────────────┘");
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
