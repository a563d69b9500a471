//! Staged curve files.
//!
//! A staged curve is a TOML document of annually compounded rates at
//! dates:
//!
//! ```toml
//! effective_date = "2013-06-20"
//! spot_date = "2013-06-25"
//!
//! [[points]]
//! date = "2013-07-25"
//! rate = 0.0019
//! ```
//!
//! Node times are ACT/365F from the spot date and the curve offset is the
//! ACT/365F fraction from the effective date to the spot date.

use std::fs;
use std::path::Path;

use pricer_core::market_data::curves::IsdaCurve;
use pricer_core::market_data::periodic_to_continuous;
use pricer_core::types::{Date, DayCountConvention};
use serde::Deserialize;

use crate::{CliError, Result};

/// One staged (date, rate) point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StagedPoint {
    pub date: Date,
    pub rate: f64,
}

/// A staged curve as read from disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StagedCurve {
    pub effective_date: Date,
    pub spot_date: Date,
    pub points: Vec<StagedPoint>,
}

impl StagedCurve {
    /// Read a staged curve file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Parse a staged curve document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Build the ISDA curve named `name`.
    pub fn build(&self, name: &str) -> Result<IsdaCurve> {
        let dc = DayCountConvention::Actual365Fixed;
        let offset = dc.year_fraction(self.effective_date, self.spot_date);
        let times = self
            .points
            .iter()
            .map(|p| dc.year_fraction(self.spot_date, p.date))
            .collect();
        let rates = self
            .points
            .iter()
            .map(|p| periodic_to_continuous(p.rate))
            .collect();
        Ok(IsdaCurve::new(name, times, rates, offset)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CURVE: &str = r#"
        effective_date = "2013-06-20"
        spot_date = "2013-06-25"

        [[points]]
        date = "2013-07-25"
        rate = 0.0019

        [[points]]
        date = "2014-06-25"
        rate = 0.0070
    "#;

    #[test]
    fn test_parse_and_build() {
        let staged = StagedCurve::from_toml_str(CURVE).unwrap();
        assert_eq!(staged.points.len(), 2);

        let curve = staged.build("IR_CURVE").unwrap();
        assert_eq!(curve.name(), "IR_CURVE");
        assert_relative_eq!(curve.offset(), 5.0 / 365.0, max_relative = 1e-15);
        assert_relative_eq!(curve.times()[0], 30.0 / 365.0, max_relative = 1e-15);
        assert_relative_eq!(curve.times()[1], 1.0, max_relative = 1e-15);
        assert_relative_eq!(curve.rates()[1], 0.0070_f64.ln_1p(), max_relative = 1e-15);
    }

    #[test]
    fn test_unordered_points_rejected() {
        let staged = StagedCurve {
            effective_date: Date::from_ymd(2013, 6, 20).unwrap(),
            spot_date: Date::from_ymd(2013, 6, 25).unwrap(),
            points: vec![
                StagedPoint {
                    date: Date::from_ymd(2014, 6, 25).unwrap(),
                    rate: 0.01,
                },
                StagedPoint {
                    date: Date::from_ymd(2013, 7, 25).unwrap(),
                    rate: 0.01,
                },
            ],
        };
        assert!(matches!(staged.build("X"), Err(CliError::MarketData(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = StagedCurve::from_path(Path::new("no/such/curve.toml")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
