//! Node-based interpolated yield curve.

use super::traits::check_time;
use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator, MonotoneConvexInterpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Quantity interpolated between curve nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroInterpolation {
    /// Linear in the zero rate.
    Linear,
    /// Linear in `ln D(t) = -r·t`, i.e. piecewise flat forwards.
    LogLinearDiscount,
    /// Hagan–West monotone-convex scheme on `r·t`.
    MonotoneConvex,
}

/// Behaviour beyond the last node (and before the first, for `Linear`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extrapolation {
    /// Hold the end zero rate constant.
    Flat,
    /// Extend the interpolated quantity along its end slope.
    Linear,
}

#[derive(Debug, Clone, PartialEq)]
enum Scheme<T: Float> {
    Flat(T),
    Rate(LinearInterpolator<T>),
    /// Integrated forward `r·t` with a leading `(0, 0)` node.
    LogDiscount(LinearInterpolator<T>),
    MonotoneConvex(MonotoneConvexInterpolator<T>),
}

/// Yield curve defined by `(time, zero rate)` nodes.
///
/// The interpolation and extrapolation rules are fixed at construction.
/// The discount-based schemes anchor `r·t = 0` at `t = 0`, so the short
/// end carries the first node's rate.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{
///     Extrapolation, InterpolatedCurve, YieldCurve, ZeroInterpolation,
/// };
///
/// let curve = InterpolatedCurve::<f64>::new(
///     &[0.5, 1.0, 2.0, 5.0],
///     &[0.020, 0.022, 0.025, 0.030],
///     ZeroInterpolation::LogLinearDiscount,
///     Extrapolation::Flat,
/// )
/// .unwrap();
///
/// assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
/// assert!((curve.zero_rate(2.0).unwrap() - 0.025).abs() < 1e-14);
/// assert!((curve.zero_rate(30.0).unwrap() - 0.030).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve<T: Float> {
    times: Vec<T>,
    rates: Vec<T>,
    interpolation: ZeroInterpolation,
    extrapolation: Extrapolation,
    scheme: Scheme<T>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Build a curve from node times (years, strictly increasing and
    /// positive) and continuously compounded zero rates.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - no nodes
    /// * `NonMonotonic` - duplicate or decreasing times
    /// * `InvalidData` - length mismatch, non-positive time or non-finite rate
    pub fn new(
        times: &[T],
        rates: &[T],
        interpolation: ZeroInterpolation,
        extrapolation: Extrapolation,
    ) -> Result<Self, MarketDataError> {
        if times.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        if times.len() != rates.len() {
            return Err(MarketDataError::InvalidData(format!(
                "{} node times but {} rates",
                times.len(),
                rates.len()
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(MarketDataError::NonMonotonic { index: i + 1 });
        }
        if !(times[0] > T::zero()) || times.iter().any(|t| !t.is_finite()) {
            return Err(MarketDataError::InvalidData(
                "node times must be positive and finite".to_string(),
            ));
        }
        if let Some(i) = rates.iter().position(|r| !r.is_finite()) {
            return Err(MarketDataError::InvalidData(format!(
                "non-finite rate at node {}",
                i
            )));
        }

        let scheme = if times.len() == 1 {
            Scheme::Flat(rates[0])
        } else {
            match interpolation {
                ZeroInterpolation::Linear => Scheme::Rate(LinearInterpolator::new(times, rates)?),
                ZeroInterpolation::LogLinearDiscount => {
                    let xs: Vec<T> = std::iter::once(T::zero()).chain(times.iter().copied()).collect();
                    let ys: Vec<T> = std::iter::once(T::zero())
                        .chain(times.iter().zip(rates).map(|(&t, &r)| r * t))
                        .collect();
                    Scheme::LogDiscount(LinearInterpolator::new(&xs, &ys)?)
                }
                ZeroInterpolation::MonotoneConvex => {
                    Scheme::MonotoneConvex(MonotoneConvexInterpolator::new(times, rates)?)
                }
            }
        };

        Ok(Self {
            times: times.to_vec(),
            rates: rates.to_vec(),
            interpolation,
            extrapolation,
            scheme,
        })
    }

    /// Node times.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Node zero rates.
    #[inline]
    pub fn rates(&self) -> &[T] {
        &self.rates
    }

    /// Interpolation rule.
    #[inline]
    pub fn interpolation(&self) -> ZeroInterpolation {
        self.interpolation
    }

    /// Extrapolation rule.
    #[inline]
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    #[inline]
    fn last(&self) -> (T, T) {
        let n = self.times.len() - 1;
        (self.times[n], self.rates[n])
    }

    fn rate_at(&self, t: T) -> Result<T, InterpolationError> {
        let (t_n, r_n) = self.last();
        let beyond = t > t_n;
        let flat = self.extrapolation == Extrapolation::Flat;

        match &self.scheme {
            Scheme::Flat(r) => Ok(*r),
            Scheme::Rate(interp) => {
                if flat && t < self.times[0] {
                    Ok(self.rates[0])
                } else if flat && beyond {
                    Ok(r_n)
                } else {
                    Ok(interp.extrapolate(t))
                }
            }
            Scheme::LogDiscount(interp) => {
                if t == T::zero() {
                    Ok(self.rates[0])
                } else if flat && beyond {
                    Ok(r_n)
                } else {
                    Ok(interp.extrapolate(t) / t)
                }
            }
            Scheme::MonotoneConvex(mc) => {
                if !beyond {
                    mc.interpolate(t)
                } else if flat {
                    Ok(r_n)
                } else {
                    Ok((r_n * t_n + mc.terminal_forward() * (t - t_n)) / t)
                }
            }
        }
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        check_time(t)?;
        Ok(self.rate_at(t)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TIMES: [f64; 5] = [0.5, 1.0, 2.0, 5.0, 10.0];
    const RATES: [f64; 5] = [0.015, 0.018, 0.022, 0.027, 0.026];
    const SCHEMES: [ZeroInterpolation; 3] = [
        ZeroInterpolation::Linear,
        ZeroInterpolation::LogLinearDiscount,
        ZeroInterpolation::MonotoneConvex,
    ];

    fn curve(interp: ZeroInterpolation, extrap: Extrapolation) -> InterpolatedCurve<f64> {
        InterpolatedCurve::new(&TIMES, &RATES, interp, extrap).unwrap()
    }

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_rejects_empty() {
        let result = InterpolatedCurve::<f64>::new(
            &[],
            &[],
            ZeroInterpolation::Linear,
            Extrapolation::Flat,
        );
        assert_eq!(
            result,
            Err(MarketDataError::InsufficientData { got: 0, need: 1 })
        );
    }

    #[test]
    fn test_rejects_duplicate_tenor() {
        let result = InterpolatedCurve::new(
            &[1.0, 2.0, 2.0],
            &[0.01, 0.02, 0.03],
            ZeroInterpolation::Linear,
            Extrapolation::Flat,
        );
        assert_eq!(result, Err(MarketDataError::NonMonotonic { index: 2 }));
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        let result = InterpolatedCurve::new(
            &[1.0, 2.0],
            &[0.01, f64::INFINITY],
            ZeroInterpolation::Linear,
            Extrapolation::Flat,
        );
        assert!(matches!(result, Err(MarketDataError::InvalidData(_))));
    }

    // ========================================
    // Contract
    // ========================================

    #[test]
    fn test_discount_factor_at_zero_is_exactly_one() {
        for scheme in SCHEMES {
            for extrap in [Extrapolation::Flat, Extrapolation::Linear] {
                assert_eq!(curve(scheme, extrap).discount_factor(0.0).unwrap(), 1.0);
            }
        }
    }

    #[test]
    fn test_negative_time_is_invalid_domain() {
        for scheme in SCHEMES {
            let c = curve(scheme, Extrapolation::Flat);
            assert_eq!(
                c.discount_factor(-0.01),
                Err(MarketDataError::InvalidDomain { t: -0.01 })
            );
        }
    }

    #[test]
    fn test_nodes_round_trip() {
        for scheme in SCHEMES {
            let c = curve(scheme, Extrapolation::Linear);
            for (t, r) in TIMES.iter().zip(RATES.iter()) {
                assert_relative_eq!(c.zero_rate(*t).unwrap(), *r, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_single_node_is_flat() {
        for scheme in SCHEMES {
            let c = InterpolatedCurve::new(&[3.0], &[0.04], scheme, Extrapolation::Linear).unwrap();
            for t in [0.0, 1.0, 3.0, 20.0] {
                assert_relative_eq!(c.zero_rate(t).unwrap(), 0.04);
            }
        }
    }

    // ========================================
    // Interpolation and extrapolation
    // ========================================

    #[test]
    fn test_linear_midpoint() {
        let c = curve(ZeroInterpolation::Linear, Extrapolation::Flat);
        assert_relative_eq!(c.zero_rate(1.5).unwrap(), 0.020, epsilon = 1e-15);
    }

    #[test]
    fn test_log_linear_has_flat_forward_between_nodes() {
        let c = curve(ZeroInterpolation::LogLinearDiscount, Extrapolation::Flat);
        let f1 = c.forward_rate(2.0, 3.0).unwrap();
        let f2 = c.forward_rate(3.0, 5.0).unwrap();
        assert_relative_eq!(f1, f2, epsilon = 1e-12);
        assert_relative_eq!(f1, (0.027 * 5.0 - 0.022 * 2.0) / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_short_end_uses_first_rate() {
        for scheme in [ZeroInterpolation::LogLinearDiscount, ZeroInterpolation::Linear] {
            let c = curve(scheme, Extrapolation::Flat);
            assert_relative_eq!(c.zero_rate(0.1).unwrap(), 0.015, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_flat_extrapolation() {
        for scheme in SCHEMES {
            let c = curve(scheme, Extrapolation::Flat);
            assert_relative_eq!(c.zero_rate(30.0).unwrap(), 0.026, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_linear_extrapolation_on_rate() {
        let c = curve(ZeroInterpolation::Linear, Extrapolation::Linear);
        // slope of last segment = -0.001 / 5
        assert_relative_eq!(c.zero_rate(15.0).unwrap(), 0.025, epsilon = 1e-14);
    }

    #[test]
    fn test_linear_extrapolation_on_log_discount_keeps_last_forward() {
        let c = curve(ZeroInterpolation::LogLinearDiscount, Extrapolation::Linear);
        let last = c.forward_rate(5.0, 10.0).unwrap();
        assert_relative_eq!(c.forward_rate(10.0, 20.0).unwrap(), last, epsilon = 1e-12);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_discount_factor_consistent_with_zero_rate(t in 0.01f64..40.0) {
                for scheme in SCHEMES {
                    let c = curve(scheme, Extrapolation::Linear);
                    let df = c.discount_factor(t).unwrap();
                    let r = c.zero_rate(t).unwrap();
                    prop_assert!((df - (-r * t).exp()).abs() < 1e-15);
                    prop_assert!(df > 0.0);
                }
            }
        }
    }
}
