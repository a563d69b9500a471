//! Static dispatch over the concrete curve types held by a market bundle.

use super::{CreditCurve, FlatCurve, InterpolatedCurve, IsdaCurve, YieldCurve};
use crate::market_data::error::MarketDataError;

/// Any curve the market bundle can store.
///
/// Pricers receive curves through this enum, which avoids trait objects and
/// keeps the bundle `Clone + Send + Sync`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
///
/// let curve = CurveEnum::flat(0.05);
/// assert!((curve.discount_factor(1.0).unwrap() - (-0.05f64).exp()).abs() < 1e-15);
/// assert!(curve.as_isda().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CurveEnum {
    /// Constant-rate curve.
    Flat(FlatCurve<f64>),
    /// Node-based interpolated curve.
    Interpolated(InterpolatedCurve<f64>),
    /// ISDA standard-model flat-forward curve.
    Isda(IsdaCurve),
}

impl CurveEnum {
    /// Flat curve at `rate`.
    #[inline]
    pub fn flat(rate: f64) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }

    /// Borrow the ISDA curve, if this is one.
    pub fn as_isda(&self) -> Option<&IsdaCurve> {
        match self {
            CurveEnum::Isda(curve) => Some(curve),
            _ => None,
        }
    }
}

impl YieldCurve<f64> for CurveEnum {
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.zero_rate(t),
            CurveEnum::Interpolated(curve) => curve.zero_rate(t),
            CurveEnum::Isda(curve) => curve.zero_rate(t),
        }
    }

    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.discount_factor(t),
            CurveEnum::Interpolated(curve) => curve.discount_factor(t),
            CurveEnum::Isda(curve) => curve.discount_factor(t),
        }
    }

    fn forward_rate(&self, t1: f64, t2: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.forward_rate(t1, t2),
            CurveEnum::Interpolated(curve) => curve.forward_rate(t1, t2),
            CurveEnum::Isda(curve) => curve.forward_rate(t1, t2),
        }
    }
}

impl CreditCurve<f64> for CurveEnum {
    /// For non-ISDA curves the zero-rate term structure doubles as the
    /// hazard term structure, read through the instantaneous forward.
    fn hazard_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Isda(curve) => curve.hazard_rate(t),
            CurveEnum::Flat(curve) => curve.zero_rate(t),
            CurveEnum::Interpolated(curve) => {
                const H: f64 = 1e-6;
                curve.forward_rate(t, t + H)
            }
        }
    }

    fn survival_probability(&self, t: f64) -> Result<f64, MarketDataError> {
        self.discount_factor(t)
    }
}

impl From<FlatCurve<f64>> for CurveEnum {
    fn from(curve: FlatCurve<f64>) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl From<InterpolatedCurve<f64>> for CurveEnum {
    fn from(curve: InterpolatedCurve<f64>) -> Self {
        CurveEnum::Interpolated(curve)
    }
}

impl From<IsdaCurve> for CurveEnum {
    fn from(curve: IsdaCurve) -> Self {
        CurveEnum::Isda(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::curves::{Extrapolation, ZeroInterpolation};
    use approx::assert_relative_eq;

    #[test]
    fn test_dispatch_matches_inner_curve() {
        let inner = InterpolatedCurve::new(
            &[1.0, 2.0],
            &[0.01, 0.02],
            ZeroInterpolation::Linear,
            Extrapolation::Flat,
        )
        .unwrap();
        let wrapped: CurveEnum = inner.clone().into();
        assert_eq!(
            wrapped.discount_factor(1.5).unwrap(),
            inner.discount_factor(1.5).unwrap()
        );
    }

    #[test]
    fn test_isda_variant_exposes_nodes() {
        let curve: CurveEnum = IsdaCurve::flat("H", 0.03).unwrap().into();
        assert_eq!(curve.as_isda().unwrap().rates(), &[0.03]);
        assert_relative_eq!(curve.hazard_rate(2.0).unwrap(), 0.03);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(CurveEnum::flat(0.01).discount_factor(-1.0).is_err());
    }
}
