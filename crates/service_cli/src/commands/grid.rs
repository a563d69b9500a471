//! Grid command implementation
//!
//! Reprices every row of an ISDA test grid and compares the dirty upfront
//! charge with the reference value.

use std::io::Read;
use std::path::Path;

use pricer_core::market_data::curves::IsdaCurve;
use pricer_core::types::{add_business_days, Date, HolidayCalendar};
use pricer_models::instruments::credit::{CdsDates, IsdaCdsDefinition, IsdaCdsMethod};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::staged::StagedCurve;
use crate::{CliError, Result};

/// One test case: coupon and spreads in basis points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridRow {
    pub trade_date: Date,
    pub maturity_date: Date,
    pub coupon: f64,
    pub recovery_rate: f64,
    pub quoted_spread: f64,
    pub cash_settle: Option<Date>,
    pub start_date: Option<Date>,
    pub upfront: f64,
}

/// Outcome of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaseResult {
    pub actual: f64,
    pub expected: f64,
    pub absolute_error: f64,
    pub relative_error: f64,
}

/// Outcome of a whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GridSummary {
    pub cases: usize,
    pub max_absolute_error: f64,
    pub max_relative_error: f64,
}

/// Read grid rows from CSV with a header line.
pub fn read_grid<R: Read>(reader: R) -> Result<Vec<GridRow>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for record in csv.deserialize::<GridRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Price one row: 1bn notional, quarterly ACT/360 premiums, weekend-only
/// calendar, Following adjustment, protection from the start of step-in.
pub fn run_case(
    row: &GridRow,
    discount: &IsdaCurve,
    hazard: Option<&IsdaCurve>,
    method: &IsdaCdsMethod,
    notional: f64,
) -> Result<CaseResult> {
    let calendar = HolidayCalendar::new("TestCalendar", []);
    let pricing_date = row.trade_date;
    let settlement = match row.cash_settle {
        Some(date) => date,
        None => add_business_days(pricing_date, 3, &calendar),
    };
    let dates = CdsDates::new(pricing_date, pricing_date.add_days(1), settlement)?;
    let start = match row.start_date {
        Some(date) => date,
        None => IsdaCdsDefinition::default_start_date(row.maturity_date, &calendar)?,
    };

    let cds = IsdaCdsDefinition::builder(start, row.maturity_date)
        .notional(notional)
        .coupon(row.coupon / 10_000.0)
        .recovery_rate(row.recovery_rate)
        .calendar(calendar)
        .build()?;

    let actual = match hazard {
        Some(curve) => method.upfront_charge(&cds, discount, curve, &dates, false)?,
        None => method.upfront_charge_from_spread(
            &cds,
            discount,
            row.quoted_spread / 10_000.0,
            &dates,
            false,
        )?,
    };
    let absolute_error = (actual - row.upfront).abs();
    Ok(CaseResult {
        actual,
        expected: row.upfront,
        absolute_error,
        relative_error: (absolute_error / row.upfront).abs(),
    })
}

/// Run every row, failing on the first one outside the tolerances.
pub fn run_grid(
    name: &str,
    rows: &[GridRow],
    discount: &IsdaCurve,
    hazard_curves: &[Option<IsdaCurve>],
    config: &CliConfig,
) -> Result<GridSummary> {
    let method = IsdaCdsMethod::new(config.solver_config());
    let mut summary = GridSummary::default();

    for (i, row) in rows.iter().enumerate() {
        let hazard = hazard_curves.get(i).and_then(Option::as_ref);
        if hazard.is_some() {
            info!("Using a staged hazard rate curve for case {}", i);
        }
        let result = run_case(row, discount, hazard, &method, config.default_notional)?;
        summary.cases += 1;
        summary.max_absolute_error = summary.max_absolute_error.max(result.absolute_error);
        summary.max_relative_error = summary.max_relative_error.max(result.relative_error);

        if !config
            .grid
            .accepts(result.absolute_error, result.relative_error)
        {
            warn!("Case {} outside tolerance: {:?}", i, result);
            return Err(CliError::GridFailure {
                grid: name.to_string(),
                // header is line 1
                line: i + 2,
                actual: result.actual,
                expected: result.expected,
                absolute_error: result.absolute_error,
                relative_error: result.relative_error,
            });
        }
    }
    Ok(summary)
}

/// Run the grid command
pub fn run(
    grid: &str,
    curve: &str,
    hazard_dir: Option<&str>,
    format: &str,
    config: &CliConfig,
) -> Result<()> {
    info!("Running test grid: {}", grid);
    let grid_path = Path::new(grid);
    if !grid_path.exists() {
        return Err(CliError::FileNotFound(grid.to_string()));
    }
    let rows = read_grid(std::fs::File::open(grid_path)?)?;
    let discount = StagedCurve::from_path(Path::new(curve))?.build("IR_CURVE")?;

    // staged hazard curves are named hazard_<row>.toml
    let hazard_curves = match hazard_dir {
        Some(dir) => (0..rows.len())
            .map(|i| {
                let path = Path::new(dir).join(format!("hazard_{}.toml", i));
                if path.exists() {
                    StagedCurve::from_path(&path)?
                        .build("HAZARD_RATE_CURVE")
                        .map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let summary = run_grid(grid, &rows, &discount, &hazard_curves, config)?;
    info!(
        "Passed {} test cases, largest absolute error was {}, largest relative error was {}",
        summary.cases, summary.max_absolute_error, summary.max_relative_error
    );

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        "table" => {
            println!("\n┌────────────┬──────────────────────┬──────────────────────┐");
            println!("│ Cases      │ Max absolute error   │ Max relative error   │");
            println!("├────────────┼──────────────────────┼──────────────────────┤");
            println!(
                "│ {:<10} │ {:<20.6e} │ {:<20.6e} │",
                summary.cases, summary.max_absolute_error, summary.max_relative_error
            );
            println!("└────────────┴──────────────────────┴──────────────────────┘");
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
