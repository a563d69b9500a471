//! Interpolation schemes used by curves and volatility surfaces.
//!
//! - [`LinearInterpolator`]: piecewise linear, with linear extension past the ends
//! - [`MonotoneConvexInterpolator`]: Hagan–West monotone-convex scheme on `r·t`
//! - [`BilinearInterpolator`]: 2D grid with flat extrapolation
//!
//! 1D interpolators implement [`Interpolator`] and are generic over
//! `T: num_traits::Float`.
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::<f64>::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
//! assert_eq!(interp.domain(), (0.0, 2.0));
//! assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-12);
//! ```

mod bilinear;
mod linear;
mod monotone_convex;
mod traits;

pub use bilinear::BilinearInterpolator;
pub use linear::LinearInterpolator;
pub use monotone_convex::MonotoneConvexInterpolator;
pub use traits::Interpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// Index `i` of the segment `[xs[i], xs[i+1]]` containing `x`.
///
/// Points left of the first node map to segment 0 and points right of the
/// last node to the final segment. Requires `xs.len() >= 2`.
#[inline]
pub fn locate_segment<T: Float>(xs: &[T], x: T) -> usize {
    let pos = xs.partition_point(|&xi| xi <= x);
    pos.clamp(1, xs.len() - 1) - 1
}

/// Validates that an axis is non-empty, finite and strictly increasing.
pub(crate) fn check_axis<T: Float>(xs: &[T]) -> Result<(), InterpolationError> {
    if xs.is_empty() {
        return Err(InterpolationError::InsufficientData { got: 0, need: 1 });
    }
    if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
        return Err(InterpolationError::InvalidInput(format!(
            "non-finite node at index {}",
            i
        )));
    }
    match xs.windows(2).position(|w| w[1] <= w[0]) {
        Some(i) => Err(InterpolationError::NonMonotonicData { index: i + 1 }),
        None => Ok(()),
    }
}
