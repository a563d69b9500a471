//! Piecewise linear interpolation.

use super::traits::out_of_bounds;
use super::{check_axis, locate_segment, Interpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Nodes must be strictly increasing; at least two are required.
/// [`extrapolate`](LinearInterpolator::extrapolate) extends the first and
/// last segments beyond the domain.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::<f64>::new(&[1.0, 2.0], &[0.01, 0.02]).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 0.015).abs() < 1e-15);
/// assert!(interp.interpolate(3.0).is_err());
/// assert!((interp.extrapolate(3.0) - 0.03).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct from node abscissae and values.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - length mismatch or non-finite values
    /// * `InsufficientData` - fewer than 2 nodes
    /// * `NonMonotonicData` - abscissae not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }
        check_axis(xs)?;
        if ys.iter().any(|y| !y.is_finite()) {
            return Err(InterpolationError::InvalidInput(
                "non-finite ordinate".to_string(),
            ));
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Node abscissae.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Node values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Value at `x`, extending the end segments linearly outside the domain.
    pub fn extrapolate(&self, x: T) -> T {
        let i = locate_segment(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        if !self.contains(x) {
            return Err(out_of_bounds(x, self.domain()));
        }
        Ok(self.extrapolate(x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reproduces_nodes() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.0, 4.0, 9.0];
        let interp = LinearInterpolator::new(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(interp.interpolate(*x).unwrap(), *y);
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(-0.1),
            Err(InterpolationError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_extrapolation_extends_end_segments() {
        let interp = LinearInterpolator::new(&[1.0, 2.0, 4.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_relative_eq!(interp.extrapolate(0.0), 0.0, epsilon = 1e-15);
        assert_relative_eq!(interp.extrapolate(6.0), 4.0, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_unsorted() {
        let result = LinearInterpolator::new(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]);
        assert_eq!(result, Err(InterpolationError::NonMonotonicData { index: 2 }));
    }

    #[test]
    fn test_rejects_single_node() {
        let result = LinearInterpolator::new(&[1.0], &[1.0]);
        assert_eq!(
            result,
            Err(InterpolationError::InsufficientData { got: 1, need: 2 })
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_bounded_by_segment_values(x in 0.0f64..3.0) {
                let ys = [0.5, -1.0, 2.0, 0.0];
                let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0, 3.0], &ys).unwrap();
                let y = interp.interpolate(x).unwrap();
                let i = locate_segment(interp.xs(), x);
                let (lo, hi) = (ys[i].min(ys[i + 1]), ys[i].max(ys[i + 1]));
                prop_assert!(y >= lo - 1e-12 && y <= hi + 1e-12);
            }
        }
    }
}
