//! Curve command implementation
//!
//! Strips an ISDA discount curve from money-market and swap quotes and
//! prints the nodes, or writes them out as a staged curve file.

use std::path::Path;

use pricer_core::market_data::curves::{IsdaCurve, YieldCurve};
use pricer_core::market_data::YieldCurveData;
use pricer_core::types::{Currency, Date, Tenor};
use pricer_optimiser::bootstrapping::IsdaYieldCurveBootstrapper;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// One quoted pillar.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct QuoteInput {
    pub tenor: Tenor,
    pub rate: f64,
}

/// Quotes file, e.g.
///
/// ```toml
/// currency = "USD"
/// spot_date = "2013-06-24"
///
/// [[cash]]
/// tenor = "3M"
/// rate = 0.0027
///
/// [[swaps]]
/// tenor = "5Y"
/// rate = 0.0141
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurveInput {
    pub currency: Currency,
    pub spot_date: Date,
    pub valuation_date: Option<Date>,
    #[serde(default)]
    pub cash: Vec<QuoteInput>,
    #[serde(default)]
    pub swaps: Vec<QuoteInput>,
}

/// A stripped node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveNode {
    pub time: f64,
    pub zero_rate: f64,
    pub discount_factor: f64,
}

impl CurveInput {
    /// Parse a quotes document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    fn market_data(&self) -> Result<YieldCurveData> {
        let mut builder = YieldCurveData::builder(self.currency, self.spot_date);
        for quote in &self.cash {
            builder = builder.cash(quote.tenor, quote.rate);
        }
        for quote in &self.swaps {
            builder = builder.swap(quote.tenor, quote.rate);
        }
        Ok(builder.build()?)
    }
}

/// Strip the curve described by `input`.
pub fn strip(input: &CurveInput, config: &CliConfig) -> Result<IsdaCurve> {
    let data = input.market_data()?;
    let mut bootstrapper = IsdaYieldCurveBootstrapper::new(config.bootstrap_config());
    if let Some(date) = input.valuation_date {
        bootstrapper = bootstrapper.with_valuation_date(date);
    }
    Ok(bootstrapper.bootstrap(input.currency.to_string(), &data)?)
}

/// Node times, zero rates and discount factors of `curve`.
pub fn nodes(curve: &IsdaCurve) -> Result<Vec<CurveNode>> {
    curve
        .times()
        .iter()
        .zip(curve.rates())
        .map(|(&time, &zero_rate)| {
            Ok(CurveNode {
                time,
                zero_rate,
                discount_factor: curve.discount_factor(time)?,
            })
        })
        .collect()
}

/// Run the curve command
pub fn run(quotes: &str, format: &str, config: &CliConfig) -> Result<()> {
    let path = Path::new(quotes);
    if !path.exists() {
        return Err(CliError::FileNotFound(quotes.to_string()));
    }
    let input = CurveInput::from_toml_str(&std::fs::read_to_string(path)?)?;
    info!(
        "Stripping {} curve from {} cash and {} swap quotes",
        input.currency,
        input.cash.len(),
        input.swaps.len()
    );

    let curve = strip(&input, config)?;
    let nodes = nodes(&curve)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&nodes)?),
        "table" => {
            println!("\n┌────────────┬──────────────────┬──────────────────┐");
            println!("│ Time       │ Zero rate        │ Discount factor  │");
            println!("├────────────┼──────────────────┼──────────────────┤");
            for node in &nodes {
                println!(
                    "│ {:<10.6} │ {:<16.10} │ {:<16.10} │",
                    node.time, node.zero_rate, node.discount_factor
                );
            }
            println!("└────────────┴──────────────────┴──────────────────┘");
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUOTES: &str = r#"
        currency = "USD"
        spot_date = "2013-06-24"
        valuation_date = "2013-06-20"

        [[cash]]
        tenor = "3M"
        rate = 0.0027

        [[cash]]
        tenor = "6M"
        rate = 0.0041

        [[swaps]]
        tenor = "2Y"
        rate = 0.0049

        [[swaps]]
        tenor = "5Y"
        rate = 0.0141
    "#;

    #[test]
    fn test_strip_from_quotes_file() {
        let input = CurveInput::from_toml_str(QUOTES).unwrap();
        assert_eq!(input.cash.len(), 2);
        assert_eq!(input.swaps[1].tenor, Tenor::years(5));

        let curve = strip(&input, &CliConfig::default()).unwrap();
        assert_eq!(curve.name(), "USD");
        assert_eq!(curve.times().len(), 4);
        assert_relative_eq!(curve.offset(), 4.0 / 365.0, max_relative = 1e-12);
    }

    #[test]
    fn test_nodes_discount_down() {
        let input = CurveInput::from_toml_str(QUOTES).unwrap();
        let curve = strip(&input, &CliConfig::default()).unwrap();
        let nodes = nodes(&curve).unwrap();
        assert!(nodes
            .windows(2)
            .all(|w| w[1].discount_factor < w[0].discount_factor));
    }

    #[test]
    fn test_missing_quotes_file() {
        let err = run("no/such/quotes.toml", "table", &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
