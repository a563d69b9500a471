//! Swaption volatility surface trait.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Black volatility indexed by option expiry and underlying swap tenor,
/// both in years.
///
/// Implementations reject negative coordinates with
/// [`MarketDataError::InvalidDomain`].
///
/// ```
/// use pricer_core::market_data::surfaces::{FlatSwaptionVolatility, SwaptionVolatilitySurface};
///
/// let surface = FlatSwaptionVolatility::new(0.2_f64);
/// assert_eq!(surface.volatility(1.0, 5.0).unwrap(), 0.2);
/// ```
pub trait SwaptionVolatilitySurface<T: Float> {
    /// Black volatility for `(expiry, tenor)`.
    fn volatility(&self, expiry: T, tenor: T) -> Result<T, MarketDataError>;
}

pub(crate) fn check_coordinates<T: Float>(expiry: T, tenor: T) -> Result<(), MarketDataError> {
    for x in [expiry, tenor] {
        if !(x >= T::zero()) {
            return Err(MarketDataError::InvalidDomain {
                t: x.to_f64().unwrap_or(f64::NAN),
            });
        }
    }
    Ok(())
}
