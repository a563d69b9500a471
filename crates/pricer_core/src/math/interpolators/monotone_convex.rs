//! Hagan–West monotone-convex interpolation of zero rates.
//!
//! The scheme works on the integrated forward `r(t)·t`. Discrete forwards
//! between nodes are preserved exactly and the instantaneous forward curve
//! is continuous wherever the discrete forwards allow it.
//!
//! Reference: P. Hagan, G. West, *Interpolation Methods for Curve
//! Construction*, Applied Mathematical Finance 13 (2006).

use super::traits::out_of_bounds;
use super::{check_axis, locate_segment, Interpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Monotone-convex interpolator of continuously compounded zero rates.
///
/// An implicit node at `t = 0` with `r·t = 0` is prepended, so the domain
/// is `[0, t_n]`. Node times must be strictly positive and increasing.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, MonotoneConvexInterpolator};
///
/// let mc = MonotoneConvexInterpolator::<f64>::new(&[1.0, 2.0, 5.0], &[0.02, 0.025, 0.03]).unwrap();
/// assert!((mc.interpolate(2.0).unwrap() - 0.025).abs() < 1e-14);
///
/// // Discrete forward between nodes is preserved.
/// let rt = |t: f64| mc.integrated_forward(t).unwrap();
/// assert!(((rt(5.0) - rt(2.0)) / 3.0 - (0.15 - 0.05) / 3.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MonotoneConvexInterpolator<T: Float> {
    /// Node times including the leading zero.
    ts: Vec<T>,
    /// Integrated forward `r·t` at each node.
    rts: Vec<T>,
    /// Discrete forward on `[ts[i-1], ts[i]]`, stored at index `i`; `fd[0]` is unused.
    fd: Vec<T>,
    /// Instantaneous forward at each node.
    f: Vec<T>,
}

impl<T: Float> MonotoneConvexInterpolator<T> {
    /// Construct from node times and zero rates.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - length mismatch, non-positive first time or non-finite rate
    /// * `InsufficientData` / `NonMonotonicData` - invalid node times
    pub fn new(times: &[T], rates: &[T]) -> Result<Self, InterpolationError> {
        if times.len() != rates.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "times and rates must have same length: got {} and {}",
                times.len(),
                rates.len()
            )));
        }
        check_axis(times)?;
        if times[0] <= T::zero() {
            return Err(InterpolationError::InvalidInput(
                "first node time must be positive".to_string(),
            ));
        }
        if rates.iter().any(|r| !r.is_finite()) {
            return Err(InterpolationError::InvalidInput(
                "non-finite rate".to_string(),
            ));
        }

        let n = times.len();
        let mut ts = Vec::with_capacity(n + 1);
        let mut rts = Vec::with_capacity(n + 1);
        ts.push(T::zero());
        rts.push(T::zero());
        for (&t, &r) in times.iter().zip(rates) {
            ts.push(t);
            rts.push(r * t);
        }

        let mut fd = vec![T::zero(); n + 1];
        for i in 1..=n {
            fd[i] = (rts[i] - rts[i - 1]) / (ts[i] - ts[i - 1]);
        }

        let half = T::from(0.5).unwrap();
        let mut f = vec![T::zero(); n + 1];
        if n == 1 {
            f[0] = fd[1];
            f[1] = fd[1];
        } else {
            for i in 1..n {
                let span = ts[i + 1] - ts[i - 1];
                f[i] = (ts[i] - ts[i - 1]) / span * fd[i + 1] + (ts[i + 1] - ts[i]) / span * fd[i];
            }
            f[0] = fd[1] - half * (f[1] - fd[1]);
            f[n] = fd[n] - half * (f[n - 1] - fd[n]);
        }

        Ok(Self { ts, rts, fd, f })
    }

    /// Integrated forward `r(t)·t` for `t` in `[0, t_n]`.
    pub fn integrated_forward(&self, t: T) -> Result<T, InterpolationError> {
        if !self.contains(t) {
            return Err(out_of_bounds(t, self.domain()));
        }
        let i = locate_segment(&self.ts, t) + 1;
        let dt = self.ts[i] - self.ts[i - 1];
        let x = (t - self.ts[i - 1]) / dt;
        let g0 = self.f[i - 1] - self.fd[i];
        let g1 = self.f[i] - self.fd[i];
        Ok(self.rts[i - 1] + self.fd[i] * (t - self.ts[i - 1]) + dt * integrated_g(g0, g1, x))
    }

    /// Instantaneous forward at `t` in `[0, t_n]`.
    pub fn forward(&self, t: T) -> Result<T, InterpolationError> {
        if !self.contains(t) {
            return Err(out_of_bounds(t, self.domain()));
        }
        let i = locate_segment(&self.ts, t) + 1;
        let x = (t - self.ts[i - 1]) / (self.ts[i] - self.ts[i - 1]);
        let g0 = self.f[i - 1] - self.fd[i];
        let g1 = self.f[i] - self.fd[i];
        Ok(self.fd[i] + g(g0, g1, x))
    }

    /// Instantaneous forward at the last node.
    #[inline]
    pub fn terminal_forward(&self) -> T {
        self.f[self.f.len() - 1]
    }
}

impl<T: Float> Interpolator<T> for MonotoneConvexInterpolator<T> {
    /// Zero rate at `t`; at `t = 0` this is the short-end forward limit.
    fn interpolate(&self, t: T) -> Result<T, InterpolationError> {
        if t == T::zero() {
            return Ok(self.f[0]);
        }
        Ok(self.integrated_forward(t)? / t)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (T::zero(), self.ts[self.ts.len() - 1])
    }
}

enum Region<T> {
    Zero,
    /// Cubic on the whole interval.
    Cubic,
    /// Flat then quadratic from `eta`.
    FlatThenRising(T),
    /// Quadratic until `eta` then flat.
    FallingThenFlat(T),
    /// Two quadratics meeting at `eta` with level `a`.
    Split(T, T),
}

fn region<T: Float>(g0: T, g1: T) -> Region<T> {
    let zero = T::zero();
    let two = T::from(2.0).unwrap();
    let three = T::from(3.0).unwrap();
    let half = T::from(0.5).unwrap();

    if g0 == zero && g1 == zero {
        Region::Zero
    } else if g0 == zero || g1 == zero {
        // Degenerate split point; the cubic still integrates to zero.
        Region::Cubic
    } else if (g0 < zero && -half * g0 <= g1 && g1 <= -two * g0)
        || (g0 > zero && -half * g0 >= g1 && g1 >= -two * g0)
    {
        Region::Cubic
    } else if (g0 < zero && g1 > -two * g0) || (g0 > zero && g1 < -two * g0) {
        Region::FlatThenRising((g1 + two * g0) / (g1 - g0))
    } else if (g0 > zero && zero > g1 && g1 > -half * g0)
        || (g0 < zero && zero < g1 && g1 < -half * g0)
    {
        Region::FallingThenFlat(three * g1 / (g1 - g0))
    } else {
        let eta = g1 / (g0 + g1);
        Region::Split(eta, -g0 * g1 / (g0 + g1))
    }
}

/// Forward correction `g(x)` on the unit interval.
fn g<T: Float>(g0: T, g1: T, x: T) -> T {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let three = T::from(3.0).unwrap();
    let four = T::from(4.0).unwrap();
    match region(g0, g1) {
        Region::Zero => T::zero(),
        Region::Cubic => {
            g0 * (one - four * x + three * x * x) + g1 * (-two * x + three * x * x)
        }
        Region::FlatThenRising(eta) => {
            if x <= eta {
                g0
            } else {
                g0 + (g1 - g0) * ((x - eta) / (one - eta)).powi(2)
            }
        }
        Region::FallingThenFlat(eta) => {
            if x < eta {
                g1 + (g0 - g1) * ((eta - x) / eta).powi(2)
            } else {
                g1
            }
        }
        Region::Split(eta, a) => {
            if x <= eta {
                a + (g0 - a) * ((eta - x) / eta).powi(2)
            } else {
                a + (g1 - a) * ((x - eta) / (one - eta)).powi(2)
            }
        }
    }
}

/// Integral of `g` over `[0, x]`; zero at `x = 1` in every region.
fn integrated_g<T: Float>(g0: T, g1: T, x: T) -> T {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let three = T::from(3.0).unwrap();
    match region(g0, g1) {
        Region::Zero => T::zero(),
        Region::Cubic => g0 * (x - two * x * x + x.powi(3)) + g1 * (-x * x + x.powi(3)),
        Region::FlatThenRising(eta) => {
            if x <= eta {
                g0 * x
            } else {
                g0 * x + (g1 - g0) * (x - eta).powi(3) / (three * (one - eta).powi(2))
            }
        }
        Region::FallingThenFlat(eta) => {
            if x < eta {
                g1 * x + (g0 - g1) * (eta.powi(3) - (eta - x).powi(3)) / (three * eta * eta)
            } else {
                g1 * x + (g0 - g1) * eta / three
            }
        }
        Region::Split(eta, a) => {
            if x <= eta {
                a * x + (g0 - a) * (eta.powi(3) - (eta - x).powi(3)) / (three * eta * eta)
            } else {
                a * x
                    + (g0 - a) * eta / three
                    + (g1 - a) * (x - eta).powi(3) / (three * (one - eta).powi(2))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TIMES: [f64; 6] = [0.25, 0.5, 1.0, 2.0, 5.0, 10.0];
    const RATES: [f64; 6] = [0.010, 0.012, 0.011, 0.018, 0.025, 0.024];

    #[test]
    fn test_round_trips_nodes() {
        let mc = MonotoneConvexInterpolator::new(&TIMES, &RATES).unwrap();
        for (t, r) in TIMES.iter().zip(RATES.iter()) {
            assert_relative_eq!(mc.interpolate(*t).unwrap(), *r, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_preserves_discrete_forwards() {
        let mc = MonotoneConvexInterpolator::new(&TIMES, &RATES).unwrap();
        for i in 1..TIMES.len() {
            let lhs = mc.integrated_forward(TIMES[i]).unwrap()
                - mc.integrated_forward(TIMES[i - 1]).unwrap();
            let rhs = RATES[i] * TIMES[i] - RATES[i - 1] * TIMES[i - 1];
            assert_relative_eq!(lhs, rhs, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_flat_input_stays_flat() {
        let mc = MonotoneConvexInterpolator::new(&[1.0, 3.0, 7.0], &[0.03, 0.03, 0.03]).unwrap();
        for t in [0.0, 0.5, 2.0, 6.9] {
            assert_relative_eq!(mc.interpolate(t).unwrap(), 0.03, epsilon = 1e-14);
            assert_relative_eq!(mc.forward(t).unwrap(), 0.03, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_single_node_is_flat() {
        let mc = MonotoneConvexInterpolator::new(&[2.0], &[0.04]).unwrap();
        assert_relative_eq!(mc.interpolate(0.7).unwrap(), 0.04, epsilon = 1e-15);
        assert_relative_eq!(mc.terminal_forward(), 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_outside_domain() {
        let mc = MonotoneConvexInterpolator::new(&TIMES, &RATES).unwrap();
        assert!(mc.integrated_forward(10.5).is_err());
        assert!(mc.interpolate(-0.1).is_err());
    }

    #[test]
    fn test_rejects_zero_first_time() {
        assert!(matches!(
            MonotoneConvexInterpolator::new(&[0.0, 1.0], &[0.01, 0.02]),
            Err(InterpolationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_forward_is_derivative_of_integrated_forward() {
        let mc = MonotoneConvexInterpolator::new(&TIMES, &RATES).unwrap();
        let h = 1e-6;
        for t in [0.3, 0.8, 1.5, 3.3, 7.5] {
            let fd = (mc.integrated_forward(t + h).unwrap()
                - mc.integrated_forward(t - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(mc.forward(t).unwrap(), fd, epsilon = 1e-7);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_integrated_g_vanishes_at_one(g0 in -1.0f64..1.0, g1 in -1.0f64..1.0) {
                prop_assert!(integrated_g(g0, g1, 1.0).abs() < 1e-12);
                prop_assert!(integrated_g(g0, g1, 0.0).abs() < 1e-15);
            }
        }
    }
}
