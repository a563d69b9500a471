//! Fixed-for-floating swap described on a time axis.
//!
//! Every date of the contract has already been turned into a time in years
//! from the valuation date, so pricing reads curves directly.

use pricer_core::market_data::curves::YieldCurve;
use pricer_core::market_data::{CurveSensitivity, CurveSensitivityBuilder, MarketBundle};
use pricer_core::types::{Currency, Date, DayCountConvention, PricingError};

use crate::schedules::{Frequency, Schedule};

/// A fixed coupon: payment time and accrual factor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedCoupon {
    /// Payment time in years.
    pub payment_time: f64,
    /// Accrual year fraction.
    pub accrual: f64,
}

/// A floating coupon fixing on the forward curve over `[start_time, end_time]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatingCoupon {
    /// Fixing period start in years.
    pub start_time: f64,
    /// Fixing period end in years.
    pub end_time: f64,
    /// Payment time in years.
    pub payment_time: f64,
    /// Accrual year fraction.
    pub accrual: f64,
}

/// Swap exchanging a fixed rate against a forward-curve index.
///
/// The fixed rate itself is not stored: the swaption carrying this swap
/// holds the strike, and pricing only needs the annuity and the par rate.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::market_data::MarketBundle;
/// use pricer_core::types::Currency;
/// use pricer_models::instruments::rates::FixedCouponSwap;
/// use pricer_models::schedules::Frequency;
///
/// let swap = FixedCouponSwap::regular(Currency::EUR, 1.0e6, 1.0, 5, Frequency::Annual, 2, "EUR", "EUR")
///     .unwrap();
/// let bundle = MarketBundle::builder()
///     .curve("EUR", FlatCurve::new(0.03_f64))
///     .build()
///     .unwrap();
///
/// // one curve for both legs: the par rate is the annual rate equivalent of 3% continuous
/// let par = swap.par_rate(&bundle).unwrap();
/// assert!((par - (0.03_f64.exp() - 1.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedCouponSwap {
    currency: Currency,
    notional: f64,
    fixed_frequency: Frequency,
    fixed_coupons: Vec<FixedCoupon>,
    floating_coupons: Vec<FloatingCoupon>,
    discount_curve: String,
    forward_curve: String,
}

impl FixedCouponSwap {
    /// Creates a swap from explicit coupons.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when a leg is empty, the notional is not finite
    /// and positive, a time is negative or not finite, an accrual is not
    /// positive, or a floating fixing period is empty.
    pub fn new(
        currency: Currency,
        notional: f64,
        fixed_frequency: Frequency,
        fixed_coupons: Vec<FixedCoupon>,
        floating_coupons: Vec<FloatingCoupon>,
        discount_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Result<Self, PricingError> {
        if !(notional.is_finite() && notional > 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "swap notional must be positive, got {}",
                notional
            )));
        }
        if fixed_coupons.is_empty() || floating_coupons.is_empty() {
            return Err(PricingError::InvalidArgument(
                "swap legs must not be empty".to_string(),
            ));
        }
        for c in &fixed_coupons {
            check_time(c.payment_time)?;
            check_accrual(c.accrual)?;
        }
        for c in &floating_coupons {
            check_time(c.start_time)?;
            check_time(c.end_time)?;
            check_time(c.payment_time)?;
            check_accrual(c.accrual)?;
            if c.end_time <= c.start_time {
                return Err(PricingError::InvalidArgument(format!(
                    "floating period [{}, {}] is empty",
                    c.start_time, c.end_time
                )));
            }
        }

        Ok(Self {
            currency,
            notional,
            fixed_frequency,
            fixed_coupons,
            floating_coupons,
            discount_curve: discount_curve.into(),
            forward_curve: forward_curve.into(),
        })
    }

    /// Swap starting at `start_time` with `years` of regular periods on both
    /// legs. Fixed accruals are `1/m`; the floating leg pays
    /// `floating_per_year` times a year.
    #[allow(clippy::too_many_arguments)]
    pub fn regular(
        currency: Currency,
        notional: f64,
        start_time: f64,
        years: u32,
        fixed_frequency: Frequency,
        floating_per_year: u32,
        discount_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Result<Self, PricingError> {
        if years == 0 || floating_per_year == 0 {
            return Err(PricingError::InvalidArgument(
                "regular swap needs a positive length and floating frequency".to_string(),
            ));
        }
        let m = fixed_frequency.periods_per_year();
        let tau = 1.0 / m as f64;
        let fixed = (1..=years * m)
            .map(|i| FixedCoupon {
                payment_time: start_time + i as f64 * tau,
                accrual: tau,
            })
            .collect();

        let tau_float = 1.0 / floating_per_year as f64;
        let floating = (0..years * floating_per_year)
            .map(|i| {
                let start = start_time + i as f64 * tau_float;
                let end = start_time + (i + 1) as f64 * tau_float;
                FloatingCoupon {
                    start_time: start,
                    end_time: end,
                    payment_time: end,
                    accrual: tau_float,
                }
            })
            .collect();

        Self::new(
            currency,
            notional,
            fixed_frequency,
            fixed,
            floating,
            discount_curve,
            forward_curve,
        )
    }

    /// Swap built from dated schedules. Times are ACT/365F from
    /// `valuation_date`; accruals follow each schedule's day count.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any period starts before the valuation date.
    #[allow(clippy::too_many_arguments)]
    pub fn from_schedules(
        currency: Currency,
        notional: f64,
        valuation_date: Date,
        fixed_schedule: &Schedule,
        fixed_frequency: Frequency,
        floating_schedule: &Schedule,
        discount_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Result<Self, PricingError> {
        let time = |d: Date| DayCountConvention::Actual365Fixed.year_fraction(valuation_date, d);

        let fixed = fixed_schedule
            .iter()
            .map(|p| FixedCoupon {
                payment_time: time(p.payment()),
                accrual: p.year_fraction(),
            })
            .collect();
        let floating = floating_schedule
            .iter()
            .map(|p| FloatingCoupon {
                start_time: time(p.start()),
                end_time: time(p.end()),
                payment_time: time(p.payment()),
                accrual: p.year_fraction(),
            })
            .collect();

        Self::new(
            currency,
            notional,
            fixed_frequency,
            fixed,
            floating,
            discount_curve,
            forward_curve,
        )
    }

    /// Currency of both legs.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Notional of both legs.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixed-leg payment frequency.
    #[inline]
    pub fn fixed_frequency(&self) -> Frequency {
        self.fixed_frequency
    }

    /// Fixed coupons in payment order.
    #[inline]
    pub fn fixed_coupons(&self) -> &[FixedCoupon] {
        &self.fixed_coupons
    }

    /// Floating coupons in payment order.
    #[inline]
    pub fn floating_coupons(&self) -> &[FloatingCoupon] {
        &self.floating_coupons
    }

    /// Name of the discounting curve.
    #[inline]
    pub fn discount_curve(&self) -> &str {
        &self.discount_curve
    }

    /// Name of the forward projection curve.
    #[inline]
    pub fn forward_curve(&self) -> &str {
        &self.forward_curve
    }

    /// Accrual start of the first floating coupon.
    pub fn start_time(&self) -> f64 {
        self.floating_coupons[0].start_time
    }

    /// Payment time of the last fixed coupon.
    pub fn last_fixed_payment_time(&self) -> f64 {
        self.fixed_coupons[self.fixed_coupons.len() - 1].payment_time
    }

    /// Physical annuity `Σ N·τᵢ·DF(tᵢ)` over the fixed leg.
    pub fn annuity(&self, bundle: &MarketBundle) -> Result<f64, PricingError> {
        let curve = bundle.curve(&self.discount_curve)?;
        let mut annuity = 0.0;
        for c in &self.fixed_coupons {
            annuity += c.accrual * curve.discount_factor(c.payment_time)?;
        }
        Ok(self.notional * annuity)
    }

    /// Sensitivity of [`annuity`](Self::annuity) to the discount curve's
    /// zero rate at each payment time.
    pub fn annuity_curve_sensitivity(
        &self,
        bundle: &MarketBundle,
    ) -> Result<CurveSensitivity, PricingError> {
        let curve = bundle.curve(&self.discount_curve)?;
        let mut builder = CurveSensitivityBuilder::new();
        for c in &self.fixed_coupons {
            let df = curve.discount_factor(c.payment_time)?;
            builder.push(
                &self.discount_curve,
                c.payment_time,
                -c.payment_time * self.notional * c.accrual * df,
            );
        }
        Ok(builder.build())
    }

    /// Present value of the floating leg,
    /// `Σ N·DF_d(pᵢ)·(P_f(sᵢ)/P_f(eᵢ) - 1)`.
    pub fn floating_leg_value(&self, bundle: &MarketBundle) -> Result<f64, PricingError> {
        let dsc = bundle.curve(&self.discount_curve)?;
        let fwd = bundle.curve(&self.forward_curve)?;
        let mut pv = 0.0;
        for c in &self.floating_coupons {
            let ratio = fwd.discount_factor(c.start_time)? / fwd.discount_factor(c.end_time)?;
            pv += dsc.discount_factor(c.payment_time)? * (ratio - 1.0);
        }
        Ok(self.notional * pv)
    }

    fn floating_leg_curve_sensitivity(
        &self,
        bundle: &MarketBundle,
    ) -> Result<CurveSensitivity, PricingError> {
        let dsc = bundle.curve(&self.discount_curve)?;
        let fwd = bundle.curve(&self.forward_curve)?;
        let mut builder = CurveSensitivityBuilder::new();
        for c in &self.floating_coupons {
            let ratio = fwd.discount_factor(c.start_time)? / fwd.discount_factor(c.end_time)?;
            let df = dsc.discount_factor(c.payment_time)?;
            let n = self.notional;
            builder.push(
                &self.discount_curve,
                c.payment_time,
                -c.payment_time * n * df * (ratio - 1.0),
            );
            builder.push(&self.forward_curve, c.start_time, -c.start_time * n * df * ratio);
            builder.push(&self.forward_curve, c.end_time, c.end_time * n * df * ratio);
        }
        Ok(builder.build())
    }

    /// Par rate: floating-leg value over the annuity.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the annuity is not positive.
    pub fn par_rate(&self, bundle: &MarketBundle) -> Result<f64, PricingError> {
        let annuity = self.annuity(bundle)?;
        if !(annuity > 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "swap annuity must be positive, got {}",
                annuity
            )));
        }
        Ok(self.floating_leg_value(bundle)? / annuity)
    }

    /// Sensitivity of the par rate to the zero rates of both curves:
    /// `dF = dPV_float/A - (F/A)·dA`.
    pub fn par_rate_curve_sensitivity(
        &self,
        bundle: &MarketBundle,
    ) -> Result<CurveSensitivity, PricingError> {
        let annuity = self.annuity(bundle)?;
        let forward = self.par_rate(bundle)?;
        let d_float = self.floating_leg_curve_sensitivity(bundle)?;
        let d_annuity = self.annuity_curve_sensitivity(bundle)?;
        Ok(CurveSensitivityBuilder::new()
            .add_scaled(&d_float, 1.0 / annuity)
            .add_scaled(&d_annuity, -forward / annuity)
            .build())
    }

    /// Cash-settlement annuity `N·Σ_{i=1..n} (1/m)/(1+f/m)^i`, with `n` the
    /// number of fixed coupons and `m` the fixed payments per year.
    pub fn cash_annuity(&self, forward: f64) -> f64 {
        let m = self.fixed_frequency.periods_per_year() as f64;
        let base = 1.0 / (1.0 + forward / m);
        let mut discount = 1.0;
        let mut sum = 0.0;
        for _ in 0..self.fixed_coupons.len() {
            discount *= base;
            sum += discount;
        }
        self.notional * sum / m
    }

    /// Derivative of [`cash_annuity`](Self::cash_annuity) with respect to
    /// the forward: `-N·Σ (i/m²)/(1+f/m)^(i+1)`.
    pub fn cash_annuity_derivative(&self, forward: f64) -> f64 {
        let m = self.fixed_frequency.periods_per_year() as f64;
        let base = 1.0 / (1.0 + forward / m);
        let mut discount = base;
        let mut sum = 0.0;
        for i in 1..=self.fixed_coupons.len() {
            discount *= base;
            sum += i as f64 * discount;
        }
        -self.notional * sum / (m * m)
    }
}

fn check_time(t: f64) -> Result<(), PricingError> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidArgument(format!(
            "coupon time must be finite and non-negative, got {}",
            t
        )))
    }
}

fn check_accrual(tau: f64) -> Result<(), PricingError> {
    if tau.is_finite() && tau > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidArgument(format!(
            "accrual factor must be positive, got {}",
            tau
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::{Extrapolation, InterpolatedCurve, ZeroInterpolation};

    fn bundle_with_rates(dsc: &[f64], fwd: &[f64]) -> MarketBundle {
        let times = [0.5, 1.0, 3.0, 7.0];
        let build = |r: &[f64]| {
            InterpolatedCurve::new(&times, r, ZeroInterpolation::Linear, Extrapolation::Flat)
                .unwrap()
        };
        MarketBundle::builder()
            .curve("DSC", build(dsc))
            .curve("FWD", build(fwd))
            .discount_curve(Currency::USD, "DSC")
            .build()
            .unwrap()
    }

    fn bundle() -> MarketBundle {
        bundle_with_rates(&[0.02, 0.022, 0.026, 0.03], &[0.025, 0.027, 0.031, 0.034])
    }

    fn swap() -> FixedCouponSwap {
        FixedCouponSwap::regular(Currency::USD, 100.0, 1.0, 5, Frequency::SemiAnnual, 4, "DSC", "FWD")
            .unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_regular_swap_layout() {
        let swap = swap();
        assert_eq!(swap.fixed_coupons().len(), 10);
        assert_eq!(swap.floating_coupons().len(), 20);
        assert_relative_eq!(swap.last_fixed_payment_time(), 6.0, epsilon = 1e-12);
        assert_eq!(swap.start_time(), 1.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        let fixed = vec![FixedCoupon { payment_time: 1.0, accrual: 1.0 }];
        let floating = vec![FloatingCoupon {
            start_time: 1.0,
            end_time: 1.0,
            payment_time: 1.0,
            accrual: 0.5,
        }];
        let result = FixedCouponSwap::new(
            Currency::USD,
            1.0,
            Frequency::Annual,
            fixed.clone(),
            floating,
            "DSC",
            "FWD",
        );
        assert!(matches!(result, Err(PricingError::InvalidArgument(_))));

        let result =
            FixedCouponSwap::new(Currency::USD, -1.0, Frequency::Annual, fixed, vec![], "DSC", "FWD");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_schedules() {
        use crate::schedules::ScheduleBuilder;

        let valuation = Date::from_ymd(2024, 1, 15).unwrap();
        let start = Date::from_ymd(2025, 1, 15).unwrap();
        let end = Date::from_ymd(2030, 1, 15).unwrap();
        let fixed = ScheduleBuilder::new()
            .start(start)
            .end(end)
            .frequency(Frequency::Annual)
            .day_count(DayCountConvention::Thirty360)
            .build()
            .unwrap();
        let floating = ScheduleBuilder::new()
            .start(start)
            .end(end)
            .frequency(Frequency::Quarterly)
            .day_count(DayCountConvention::Actual360)
            .build()
            .unwrap();

        let swap = FixedCouponSwap::from_schedules(
            Currency::EUR,
            1.0,
            valuation,
            &fixed,
            Frequency::Annual,
            &floating,
            "DSC",
            "FWD",
        )
        .unwrap();
        assert_eq!(swap.fixed_coupons().len(), 5);
        assert_eq!(swap.floating_coupons().len(), 20);
        assert_relative_eq!(swap.fixed_coupons()[0].accrual, 1.0, epsilon = 1e-15);
        assert_relative_eq!(swap.start_time(), 366.0 / 365.0, epsilon = 1e-15);
    }

    // ==========================================================
    // Annuities and par rate
    // ==========================================================

    #[test]
    fn test_cash_annuity_matches_closed_form() {
        let swap = swap();
        let f: f64 = 0.031;
        let m: f64 = 2.0;
        let n: f64 = 10.0;
        let closed = 100.0 * (1.0 - (1.0 + f / m).powf(-n)) / f;
        assert_relative_eq!(swap.cash_annuity(f), closed, max_relative = 1e-13);
    }

    #[test]
    fn test_cash_annuity_derivative() {
        let swap = swap();
        let h = 1e-6;
        for f in [0.0, 0.01, 0.05] {
            let fd = (swap.cash_annuity(f + h) - swap.cash_annuity(f - h)) / (2.0 * h);
            assert_relative_eq!(swap.cash_annuity_derivative(f), fd, max_relative = 1e-7);
        }
    }

    #[test]
    fn test_swap_at_par_rate_is_balanced() {
        let bundle = bundle();
        let swap = swap();
        let par = swap.par_rate(&bundle).unwrap();
        let fixed_value = par * swap.annuity(&bundle).unwrap();
        assert_relative_eq!(
            fixed_value,
            swap.floating_leg_value(&bundle).unwrap(),
            max_relative = 1e-14
        );
        assert!(par > 0.025 && par < 0.04);
    }

    #[test]
    fn test_par_rate_sensitivity_against_bumped_curves() {
        let dsc = [0.02, 0.022, 0.026, 0.03];
        let fwd = [0.025, 0.027, 0.031, 0.034];
        let swap = swap();
        let sens = swap.par_rate_curve_sensitivity(&bundle_with_rates(&dsc, &fwd)).unwrap();

        // a parallel shift of every node moves every zero rate by the same amount
        let h = 1e-6;
        let shift = |r: &[f64], s: f64| r.iter().map(|x| x + s).collect::<Vec<_>>();

        let up = swap
            .par_rate(&bundle_with_rates(&dsc, &shift(&fwd, h)))
            .unwrap();
        let down = swap
            .par_rate(&bundle_with_rates(&dsc, &shift(&fwd, -h)))
            .unwrap();
        assert_relative_eq!(sens.total("FWD"), (up - down) / (2.0 * h), max_relative = 1e-6);

        let up = swap
            .par_rate(&bundle_with_rates(&shift(&dsc, h), &fwd))
            .unwrap();
        let down = swap
            .par_rate(&bundle_with_rates(&shift(&dsc, -h), &fwd))
            .unwrap();
        assert_relative_eq!(sens.total("DSC"), (up - down) / (2.0 * h), max_relative = 1e-5);
    }

    #[test]
    fn test_missing_curve_is_an_error() {
        let bundle = MarketBundle::builder()
            .curve("OTHER", pricer_core::market_data::curves::FlatCurve::new(0.01_f64))
            .build()
            .unwrap();
        assert!(swap().par_rate(&bundle).is_err());
    }
}
