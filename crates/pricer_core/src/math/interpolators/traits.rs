//! Common interface of 1D interpolators.

use crate::types::InterpolationError;
use num_traits::Float;

/// A 1D interpolation scheme over strictly increasing nodes.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// Returns `InterpolationError::OutOfBounds` when `x` lies outside
    /// [`domain`](Interpolator::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Closed interval `(min, max)` covered by the nodes.
    fn domain(&self) -> (T, T);

    /// Returns true if `x` lies inside the domain.
    fn contains(&self, x: T) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }
}

pub(crate) fn out_of_bounds<T: Float>(x: T, (min, max): (T, T)) -> InterpolationError {
    InterpolationError::OutOfBounds {
        x: x.to_f64().unwrap_or(f64::NAN),
        min: min.to_f64().unwrap_or(f64::NAN),
        max: max.to_f64().unwrap_or(f64::NAN),
    }
}
