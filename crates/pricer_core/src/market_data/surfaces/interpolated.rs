//! Expiry × tenor grid of swaption volatilities.

use super::traits::check_coordinates;
use super::SwaptionVolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::BilinearInterpolator;
use num_traits::Float;

/// Swaption volatility grid, bilinear inside and flat outside.
///
/// `vols[i][j]` is the volatility for `expiries[i]` and `tenors[j]`.
///
/// ```
/// use pricer_core::market_data::surfaces::{
///     InterpolatedSwaptionVolatility, SwaptionVolatilitySurface,
/// };
///
/// let surface = InterpolatedSwaptionVolatility::<f64>::new(
///     &[1.0, 5.0],
///     &[2.0, 10.0],
///     vec![vec![0.30, 0.25], vec![0.22, 0.20]],
/// )
/// .unwrap();
/// assert!((surface.volatility(1.0, 6.0).unwrap() - 0.275).abs() < 1e-12);
/// assert!((surface.volatility(20.0, 30.0).unwrap() - 0.20).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedSwaptionVolatility<T: Float> {
    grid: BilinearInterpolator<T>,
}

impl<T: Float> InterpolatedSwaptionVolatility<T> {
    /// Build from expiry nodes, tenor nodes and the volatility grid.
    ///
    /// # Errors
    ///
    /// `MarketDataError::Interpolation` for malformed axes or grid, and
    /// `InvalidData` for a non-positive volatility.
    pub fn new(expiries: &[T], tenors: &[T], vols: Vec<Vec<T>>) -> Result<Self, MarketDataError> {
        if vols.iter().flatten().any(|v| !(*v > T::zero())) {
            return Err(MarketDataError::InvalidData(
                "swaption volatilities must be positive".to_string(),
            ));
        }
        Ok(Self {
            grid: BilinearInterpolator::new(expiries, tenors, vols)?,
        })
    }

    /// Expiry nodes.
    pub fn expiries(&self) -> &[T] {
        self.grid.xs()
    }

    /// Tenor nodes.
    pub fn tenors(&self) -> &[T] {
        self.grid.ys()
    }
}

impl<T: Float> SwaptionVolatilitySurface<T> for InterpolatedSwaptionVolatility<T> {
    fn volatility(&self, expiry: T, tenor: T) -> Result<T, MarketDataError> {
        check_coordinates(expiry, tenor)?;
        Ok(self.grid.interpolate(expiry, tenor))
    }
}
