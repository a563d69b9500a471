//! Bilinear 2D interpolation for volatility grids.

use super::{check_axis, locate_segment};
use crate::types::InterpolationError;
use num_traits::Float;

/// Bilinear interpolator over a rectangular grid with flat extrapolation.
///
/// The grid is stored as `zs[i][j] = z(xs[i], ys[j])`. Queries outside the
/// grid are clamped onto its boundary, so the surface extends flat in both
/// directions. An axis with a single node is constant along that axis.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let expiries = [1.0, 2.0];
/// let tenors = [5.0, 10.0];
/// let vols = vec![vec![0.20, 0.22], vec![0.24, 0.26]];
///
/// let grid = BilinearInterpolator::<f64>::new(&expiries, &tenors, vols).unwrap();
/// assert!((grid.interpolate(1.5, 7.5) - 0.23).abs() < 1e-12);
/// assert!((grid.interpolate(0.1, 30.0) - 0.22).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    zs: Vec<Vec<T>>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Construct from axis nodes and grid values.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - an axis is empty
    /// * `NonMonotonicData` - an axis is not strictly increasing
    /// * `InvalidInput` - grid shape does not match the axes, or a value is not finite
    pub fn new(xs: &[T], ys: &[T], zs: Vec<Vec<T>>) -> Result<Self, InterpolationError> {
        check_axis(xs)?;
        check_axis(ys)?;

        if zs.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "grid rows ({}) must match x-axis length ({})",
                zs.len(),
                xs.len()
            )));
        }
        for (i, row) in zs.iter().enumerate() {
            if row.len() != ys.len() {
                return Err(InterpolationError::InvalidInput(format!(
                    "grid row {} length ({}) must match y-axis length ({})",
                    i,
                    row.len(),
                    ys.len()
                )));
            }
            if row.iter().any(|z| !z.is_finite()) {
                return Err(InterpolationError::InvalidInput(format!(
                    "grid row {} contains a non-finite value",
                    i
                )));
            }
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs,
        })
    }

    /// Interpolated value at `(x, y)`, clamped onto the grid.
    pub fn interpolate(&self, x: T, y: T) -> T {
        let (i, u) = weight(&self.xs, x);
        let (j, v) = weight(&self.ys, y);
        let i1 = (i + 1).min(self.xs.len() - 1);
        let j1 = (j + 1).min(self.ys.len() - 1);

        let one = T::one();
        (one - u) * (one - v) * self.zs[i][j]
            + u * (one - v) * self.zs[i1][j]
            + (one - u) * v * self.zs[i][j1]
            + u * v * self.zs[i1][j1]
    }

    /// X-axis nodes.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Y-axis nodes.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }
}

/// Cell index and clamped weight of `x` along one axis.
fn weight<T: Float>(nodes: &[T], x: T) -> (usize, T) {
    if nodes.len() == 1 {
        return (0, T::zero());
    }
    let i = locate_segment(nodes, x);
    let w = (x - nodes[i]) / (nodes[i + 1] - nodes[i]);
    (i, w.max(T::zero()).min(T::one()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> BilinearInterpolator<f64> {
        BilinearInterpolator::new(
            &[0.0, 1.0, 2.0],
            &[0.0, 1.0],
            vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_reproduces_nodes() {
        let g = grid();
        assert_relative_eq!(g.interpolate(1.0, 0.0), 2.0);
        assert_relative_eq!(g.interpolate(2.0, 1.0), 5.0);
    }

    #[test]
    fn test_cell_centre() {
        assert_relative_eq!(grid().interpolate(0.5, 0.5), 1.5, epsilon = 1e-14);
    }

    #[test]
    fn test_flat_extrapolation() {
        let g = grid();
        assert_relative_eq!(g.interpolate(-3.0, -3.0), 0.0);
        assert_relative_eq!(g.interpolate(10.0, 0.5), 4.5, epsilon = 1e-14);
    }

    #[test]
    fn test_single_node_axis() {
        let g = BilinearInterpolator::new(&[1.0], &[1.0, 3.0], vec![vec![0.1, 0.3]]).unwrap();
        assert_relative_eq!(g.interpolate(7.0, 2.0), 0.2, epsilon = 1e-14);
    }

    #[test]
    fn test_shape_mismatch() {
        let result = BilinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0], vec![vec![0.0, 1.0]]);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_non_monotonic_axis() {
        let result =
            BilinearInterpolator::new(&[0.0, 0.0], &[1.0], vec![vec![0.0], vec![1.0]]);
        assert_eq!(result, Err(InterpolationError::NonMonotonicData { index: 1 }));
    }
}
