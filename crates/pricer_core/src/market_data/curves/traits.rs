//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Discount curve: maps time (in years) to discount factors and
/// continuously compounded zero rates.
///
/// # Contract
///
/// - `discount_factor(0) == 1` exactly
/// - any query at `t < 0` fails with [`MarketDataError::InvalidDomain`]
/// - `discount_factor(t) == exp(-zero_rate(t) * t)`
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
/// assert!((curve.discount_factor(1.0).unwrap() - (-0.05f64).exp()).abs() < 1e-15);
/// assert!((curve.forward_rate(1.0, 2.0).unwrap() - 0.05).abs() < 1e-12);
/// assert!(curve.discount_factor(-1.0).is_err());
/// ```
pub trait YieldCurve<T: Float> {
    /// Continuously compounded zero rate for maturity `t >= 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError>;

    /// Discount factor for maturity `t >= 0`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        check_time(t)?;
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok((-self.zero_rate(t)? * t).exp())
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    ///
    /// Fails with `InvalidDomain` if either time is negative and with
    /// `InvalidData` if `t2 <= t1`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidData(format!(
                "forward period must be positive: [{}, {}]",
                t1.to_f64().unwrap_or(f64::NAN),
                t2.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok((df1 / df2).ln() / dt)
    }
}

/// Rejects negative (or NaN) query times.
#[inline]
pub(crate) fn check_time<T: Float>(t: T) -> Result<(), MarketDataError> {
    if t >= T::zero() {
        Ok(())
    } else {
        Err(MarketDataError::InvalidDomain {
            t: t.to_f64().unwrap_or(f64::NAN),
        })
    }
}
