//! Credit curve abstraction.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Hazard-rate term structure.
///
/// # Contract
///
/// - `survival_probability(0) == 1`
/// - survival is non-increasing in `t` when hazard rates are non-negative
/// - negative times fail with [`MarketDataError::InvalidDomain`]
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CreditCurve, IsdaCurve};
///
/// let hazard = IsdaCurve::flat("ACME", 0.02).unwrap();
/// let q = hazard.survival_probability(5.0).unwrap();
/// assert!((q - (-0.1f64).exp()).abs() < 1e-14);
/// assert!((hazard.hazard_rate(3.0).unwrap() - 0.02).abs() < 1e-15);
/// ```
pub trait CreditCurve<T: Float> {
    /// Instantaneous hazard rate at `t`.
    fn hazard_rate(&self, t: T) -> Result<T, MarketDataError>;

    /// Probability of no default before `t`.
    fn survival_probability(&self, t: T) -> Result<T, MarketDataError>;

    /// Probability of default before `t`.
    fn default_probability(&self, t: T) -> Result<T, MarketDataError> {
        Ok(T::one() - self.survival_probability(t)?)
    }

    /// Probability of surviving to `t2` given survival to `t1`.
    fn forward_survival_probability(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::InvalidData(
                "forward survival needs t2 >= t1".to_string(),
            ));
        }
        Ok(self.survival_probability(t2)? / self.survival_probability(t1)?)
    }
}
