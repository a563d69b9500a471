//! Swaption volatility surfaces.
//!
//! - [`SwaptionVolatilitySurface`]: volatility by (expiry, tenor)
//! - [`FlatSwaptionVolatility`]: constant volatility
//! - [`InterpolatedSwaptionVolatility`]: bilinear expiry × tenor grid
//! - [`SwaptionVolatility`]: static dispatch over the above

mod flat;
mod interpolated;
mod traits;

pub use flat::FlatSwaptionVolatility;
pub use interpolated::InterpolatedSwaptionVolatility;
pub use traits::SwaptionVolatilitySurface;

use crate::market_data::error::MarketDataError;

/// Any swaption surface the market bundle can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum SwaptionVolatility {
    /// Constant volatility.
    Flat(FlatSwaptionVolatility<f64>),
    /// Expiry × tenor grid.
    Interpolated(InterpolatedSwaptionVolatility<f64>),
}

impl SwaptionVolatilitySurface<f64> for SwaptionVolatility {
    fn volatility(&self, expiry: f64, tenor: f64) -> Result<f64, MarketDataError> {
        match self {
            SwaptionVolatility::Flat(s) => s.volatility(expiry, tenor),
            SwaptionVolatility::Interpolated(s) => s.volatility(expiry, tenor),
        }
    }
}

impl From<FlatSwaptionVolatility<f64>> for SwaptionVolatility {
    fn from(s: FlatSwaptionVolatility<f64>) -> Self {
        SwaptionVolatility::Flat(s)
    }
}

impl From<InterpolatedSwaptionVolatility<f64>> for SwaptionVolatility {
    fn from(s: InterpolatedSwaptionVolatility<f64>) -> Self {
        SwaptionVolatility::Interpolated(s)
    }
}
