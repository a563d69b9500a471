//! ISDA standard-model curve.
//!
//! The ISDA CDS standard model stores both discount and hazard curves as
//! continuously compounded rates at node times measured from a base date.
//! Between nodes `r·t` is linear (piecewise flat forwards); outside the
//! nodes the end rates are held flat.

use super::credit::CreditCurve;
use super::traits::check_time;
use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::locate_segment;

/// Flat-forward curve in the ISDA standard model.
///
/// Node times are year fractions (ACT/365F) from the curve's base date.
/// `offset` is the year fraction from the valuation (effective) date to the
/// base date, so queries measured from the effective date are shifted by
/// `-offset` before the node lookup. Discount factors are normalised to one
/// at the effective date.
///
/// The same object serves as a hazard curve: the survival probability is
/// read exactly like a discount factor.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{IsdaCurve, YieldCurve};
///
/// let curve = IsdaCurve::new("USD", vec![1.0, 5.0], vec![0.01, 0.02], 0.0).unwrap();
/// assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
///
/// // flat forward between 1y and 5y: (0.10 - 0.01) / 4
/// let f = curve.forward_rate(2.0, 3.0).unwrap();
/// assert!((f - 0.0225).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsdaCurve {
    name: String,
    times: Vec<f64>,
    rates: Vec<f64>,
    offset: f64,
}

impl IsdaCurve {
    /// Build a curve from node times (from the base date), continuous rates
    /// and the effective-to-base offset.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - no nodes
    /// * `NonMonotonic` - node times not strictly increasing
    /// * `InvalidData` - length mismatch or non-finite input
    pub fn new(
        name: impl Into<String>,
        times: Vec<f64>,
        rates: Vec<f64>,
        offset: f64,
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
        if times.iter().chain(&rates).any(|x| !x.is_finite()) || !offset.is_finite() {
            return Err(MarketDataError::InvalidData(
                "curve inputs must be finite".to_string(),
            ));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(MarketDataError::NonMonotonic { index: i + 1 });
        }
        Ok(Self {
            name: name.into(),
            times,
            rates,
            offset,
        })
    }

    /// A single-node curve, flat at `rate`.
    pub fn flat(name: impl Into<String>, rate: f64) -> Result<Self, MarketDataError> {
        Self::new(name, vec![1.0], vec![rate], 0.0)
    }

    /// Curve identifier.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node times from the base date.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Continuous rates at the nodes.
    #[inline]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Year fraction from the effective date to the base date.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Node times measured from the effective date.
    pub fn node_times_from_effective(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().map(move |t| t + self.offset)
    }

    /// Integrated rate `r(s)·s` at base-date time `s` (may be negative).
    pub fn rt(&self, s: f64) -> f64 {
        let n = self.times.len() - 1;
        if s <= self.times[0] {
            return self.rates[0] * s;
        }
        if s >= self.times[n] {
            return self.rates[n] * s;
        }
        let i = locate_segment(&self.times, s);
        let (t0, t1) = (self.times[i], self.times[i + 1]);
        let (rt0, rt1) = (self.rates[i] * t0, self.rates[i + 1] * t1);
        rt0 + (rt1 - rt0) * (s - t0) / (t1 - t0)
    }

    /// Instantaneous forward at base-date time `s`.
    fn forward_at(&self, s: f64) -> f64 {
        let n = self.times.len() - 1;
        if s < self.times[0] {
            return self.rates[0];
        }
        if s >= self.times[n] {
            return self.rates[n];
        }
        let i = locate_segment(&self.times, s);
        let (t0, t1) = (self.times[i], self.times[i + 1]);
        (self.rates[i + 1] * t1 - self.rates[i] * t0) / (t1 - t0)
    }

    /// Returns a copy with the same nodes and `rates` replaced.
    pub fn with_rates(&self, rates: Vec<f64>) -> Result<Self, MarketDataError> {
        Self::new(self.name.clone(), self.times.clone(), rates, self.offset)
    }
}

impl YieldCurve<f64> for IsdaCurve {
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        if t == 0.0 {
            return Ok(self.forward_at(-self.offset));
        }
        Ok(-self.discount_factor(t)?.ln() / t)
    }

    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        if t == 0.0 {
            return Ok(1.0);
        }
        Ok((-(self.rt(t - self.offset) - self.rt(-self.offset))).exp())
    }
}

impl CreditCurve<f64> for IsdaCurve {
    fn hazard_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok(self.forward_at(t - self.offset))
    }

    fn survival_probability(&self, t: f64) -> Result<f64, MarketDataError> {
        self.discount_factor(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve(offset: f64) -> IsdaCurve {
        IsdaCurve::new(
            "TEST",
            vec![0.5, 1.0, 3.0, 5.0],
            vec![0.010, 0.012, 0.020, 0.025],
            offset,
        )
        .unwrap()
    }

    #[test]
    fn test_discount_factor_at_nodes() {
        let c = curve(0.0);
        for (&t, &r) in c.times().iter().zip(c.rates()) {
            assert_relative_eq!(
                c.discount_factor(t).unwrap(),
                (-r * t).exp(),
                max_relative = 1e-14
            );
        }
    }

    #[test]
    fn test_flat_extrapolation_both_ends() {
        let c = curve(0.0);
        assert_relative_eq!(c.zero_rate(0.1).unwrap(), 0.010, epsilon = 1e-14);
        assert_relative_eq!(c.zero_rate(12.0).unwrap(), 0.025, epsilon = 1e-14);
    }

    #[test]
    fn test_flat_forward_between_nodes() {
        let c = curve(0.0);
        let expected = (0.020 * 3.0 - 0.012 * 1.0) / 2.0;
        assert_relative_eq!(c.forward_rate(1.2, 1.7).unwrap(), expected, epsilon = 1e-12);
        assert_relative_eq!(c.hazard_rate(2.0).unwrap(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_offset_normalises_to_effective_date() {
        // base date three days after the effective date
        let offset = 3.0 / 365.0;
        let c = curve(offset);
        assert_eq!(c.discount_factor(0.0).unwrap(), 1.0);
        let t = 2.0;
        let expected = (-(c.rt(t - offset) - c.rt(-offset))).exp();
        assert_relative_eq!(c.discount_factor(t).unwrap(), expected, max_relative = 1e-15);
        // rt is linear left of the first node, so the shift adds r0·offset
        assert_relative_eq!(
            c.discount_factor(offset + 0.5).unwrap(),
            (-0.010 * (0.5 + offset)).exp(),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_survival_equals_discount_reading() {
        let c = curve(0.0);
        assert_eq!(
            c.survival_probability(4.0).unwrap(),
            c.discount_factor(4.0).unwrap()
        );
        assert_relative_eq!(
            c.default_probability(4.0).unwrap(),
            1.0 - c.discount_factor(4.0).unwrap()
        );
    }

    #[test]
    fn test_negative_time() {
        assert!(matches!(
            curve(0.0).survival_probability(-1.0),
            Err(MarketDataError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_rejects_overlapping_nodes() {
        let result = IsdaCurve::new("X", vec![1.0, 1.0], vec![0.01, 0.02], 0.0);
        assert_eq!(result, Err(MarketDataError::NonMonotonic { index: 1 }));
    }
}
