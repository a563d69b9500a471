//! Flat swaption volatility.

use super::traits::check_coordinates;
use super::SwaptionVolatilitySurface;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// The same Black volatility for every expiry and tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatSwaptionVolatility<T: Float> {
    sigma: T,
}

impl<T: Float> FlatSwaptionVolatility<T> {
    /// Constant volatility `sigma`.
    #[inline]
    pub fn new(sigma: T) -> Self {
        Self { sigma }
    }

    /// The constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: Float> SwaptionVolatilitySurface<T> for FlatSwaptionVolatility<T> {
    fn volatility(&self, expiry: T, tenor: T) -> Result<T, MarketDataError> {
        check_coordinates(expiry, tenor)?;
        Ok(self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_everywhere() {
        let s = FlatSwaptionVolatility::new(0.35);
        assert_eq!(s.volatility(0.0, 30.0).unwrap(), 0.35);
        assert_eq!(s.volatility(10.0, 1.0).unwrap(), 0.35);
    }

    #[test]
    fn test_negative_expiry() {
        let s = FlatSwaptionVolatility::new(0.35);
        assert_eq!(
            s.volatility(-1.0, 5.0),
            Err(MarketDataError::InvalidDomain { t: -1.0 })
        );
    }
}
