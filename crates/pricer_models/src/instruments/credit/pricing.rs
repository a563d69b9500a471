//! ISDA standard-model CDS pricing.
//!
//! Both legs are integrated over a timeline holding every node of the
//! discount and hazard curves, on which hazard and forward rates are
//! piecewise constant, so each sub-interval has a closed form. Values are
//! taken at the pricing date and then carried to the cash settlement date.
//!
//! Times are ACT/365F year fractions from the pricing date; both curves
//! must be read from that date (their offsets handle a later base date).

use pricer_core::market_data::curves::{CreditCurve, IsdaCurve, YieldCurve};
use pricer_core::math::solvers::{expand_bracket_upward, BrentSolver, SolverConfig};
use pricer_core::types::{add_business_days, Calendar, Date, DayCountConvention, PricingError};

use super::{CdsCoupon, IsdaCdsDefinition};

/// Below this exponent the closed forms switch to their Taylor series. The
/// series are carried to x⁷, so the truncation error stays below 1e-21.
const SERIES_THRESHOLD: f64 = 1.0e-2;

/// Doublings allowed when bracketing a hazard rate.
const MAX_BRACKET_EXPANSIONS: usize = 60;

/// Valuation dates of a CDS trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdsDates {
    /// Date the curves are read from.
    pub pricing_date: Date,
    /// First day the buyer is protected (T+1 calendar).
    pub stepin_date: Date,
    /// Cash settlement date of the upfront.
    pub settlement_date: Date,
}

impl CdsDates {
    /// Explicit dates.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if step-in or settlement precede the pricing date.
    pub fn new(
        pricing_date: Date,
        stepin_date: Date,
        settlement_date: Date,
    ) -> Result<Self, PricingError> {
        if stepin_date < pricing_date || settlement_date < pricing_date {
            return Err(PricingError::InvalidArgument(format!(
                "step-in {} and settlement {} must not precede pricing date {}",
                stepin_date, settlement_date, pricing_date
            )));
        }
        Ok(Self {
            pricing_date,
            stepin_date,
            settlement_date,
        })
    }

    /// Standard dates: step-in T+1 calendar day, settlement T+3 business
    /// days.
    ///
    /// ```
    /// use pricer_core::types::{Date, WeekendCalendar};
    /// use pricer_models::instruments::credit::CdsDates;
    ///
    /// // Friday trade settles on Wednesday
    /// let dates = CdsDates::standard(Date::from_ymd(2013, 6, 21).unwrap(), &WeekendCalendar);
    /// assert_eq!(dates.stepin_date, Date::from_ymd(2013, 6, 22).unwrap());
    /// assert_eq!(dates.settlement_date, Date::from_ymd(2013, 6, 26).unwrap());
    /// ```
    pub fn standard<C: Calendar + ?Sized>(pricing_date: Date, calendar: &C) -> Self {
        Self {
            pricing_date,
            stepin_date: pricing_date.add_days(1),
            settlement_date: add_business_days(pricing_date, 3, calendar),
        }
    }

    fn time(&self, date: Date) -> f64 {
        DayCountConvention::Actual365Fixed.year_fraction(self.pricing_date, date)
    }
}

/// Premium leg per unit coupon, before and after accrued.
#[derive(Debug, Clone, Copy)]
struct Annuity {
    dirty: f64,
    accrued: f64,
}

/// ISDA standard-model CDS method.
///
/// The flat-hazard calibration uses a Brent root find whose tolerance and
/// iteration cap come from the method's [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::IsdaCurve;
/// use pricer_core::types::{Date, WeekendCalendar};
/// use pricer_models::instruments::credit::{CdsDates, IsdaCdsDefinition, IsdaCdsMethod};
///
/// let cds = IsdaCdsDefinition::builder(
///     Date::from_ymd(2013, 3, 20).unwrap(),
///     Date::from_ymd(2018, 6, 20).unwrap(),
/// )
/// .notional(1.0e7)
/// .coupon(0.01)
/// .build()
/// .unwrap();
/// let discount = IsdaCurve::flat("USD", 0.02).unwrap();
/// let dates = CdsDates::standard(Date::from_ymd(2013, 6, 20).unwrap(), &WeekendCalendar);
/// let method = IsdaCdsMethod::default();
///
/// // quoted at the coupon: the clean upfront vanishes
/// let clean = method
///     .upfront_charge_from_spread(&cds, &discount, 0.01, &dates, true)
///     .unwrap();
/// assert!(clean.abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsdaCdsMethod {
    solver: SolverConfig<f64>,
}

impl Default for IsdaCdsMethod {
    fn default() -> Self {
        Self::new(SolverConfig::new(1.0e-15, 100))
    }
}

impl IsdaCdsMethod {
    /// Method with the given calibration settings.
    pub fn new(solver: SolverConfig<f64>) -> Self {
        Self { solver }
    }

    /// Calibration settings.
    pub fn solver_config(&self) -> &SolverConfig<f64> {
        &self.solver
    }

    /// Upfront charge paid by the protection buyer at settlement:
    /// protection leg less premium leg. The clean charge adds back the
    /// coupon accrued up to step-in.
    pub fn upfront_charge(
        &self,
        cds: &IsdaCdsDefinition,
        discount: &IsdaCurve,
        hazard: &IsdaCurve,
        dates: &CdsDates,
        clean: bool,
    ) -> Result<f64, PricingError> {
        let protection = self.protection_leg(cds, discount, hazard, dates)?;
        let premium = self.premium_leg(cds, discount, hazard, dates, clean)?;
        Ok(protection - premium)
    }

    /// Upfront charge with the hazard curve implied from a flat quoted
    /// spread; see [`hazard_rate_from_spread`](Self::hazard_rate_from_spread).
    pub fn upfront_charge_from_spread(
        &self,
        cds: &IsdaCdsDefinition,
        discount: &IsdaCurve,
        market_spread: f64,
        dates: &CdsDates,
        clean: bool,
    ) -> Result<f64, PricingError> {
        let rate = self.hazard_rate_from_spread(cds, discount, market_spread, dates)?;
        let hazard = IsdaCurve::flat("HAZARD", rate)?;
        self.upfront_charge(cds, discount, &hazard, dates, clean)
    }

    /// Premium leg value at settlement: coupons weighted by survival, plus
    /// the accrued coupon paid on default. Clean excludes the accrued.
    pub fn premium_leg(
        &self,
        cds: &IsdaCdsDefinition,
        discount: &IsdaCurve,
        hazard: &IsdaCurve,
        dates: &CdsDates,
        clean: bool,
    ) -> Result<f64, PricingError> {
        let annuity = self.annuity(cds, discount, hazard, dates)?;
        let per_unit = if clean {
            annuity.dirty - annuity.accrued
        } else {
            annuity.dirty
        };
        Ok(cds.coupon() * per_unit)
    }

    /// Protection leg value at settlement.
    pub fn protection_leg(
        &self,
        cds: &IsdaCdsDefinition,
        discount: &IsdaCurve,
        hazard: &IsdaCurve,
        dates: &CdsDates,
    ) -> Result<f64, PricingError> {
        let shift = if cds.protect_start() { 1 } else { 0 };
        let start = cds
            .start_date()
            .max(dates.stepin_date.add_days(-shift))
            .max(dates.pricing_date);
        let end = cds.maturity();
        if end <= start {
            return Ok(0.0);
        }
        let (t0, t1) = (dates.time(start), dates.time(end));

        let value = if cds.pay_on_default() {
            let mut value = 0.0;
            for (u0, u1) in timeline(discount, hazard, t0, t1) {
                let (q0, q1) = (hazard.survival_probability(u0)?, hazard.survival_probability(u1)?);
                let (p0, p1) = (discount.discount_factor(u0)?, discount.discount_factor(u1)?);
                let lambda_dt = (q0 / q1).ln();
                let x = lambda_dt + (p0 / p1).ln();
                value += lambda_dt * q0 * p0 * e1(x);
            }
            value
        } else {
            let q0 = hazard.survival_probability(t0)?;
            let q1 = hazard.survival_probability(t1)?;
            (q0 - q1) * discount.discount_factor(t1)?
        };

        let df_settle = discount.discount_factor(dates.time(dates.settlement_date))?;
        Ok(cds.notional() * (1.0 - cds.recovery_rate()) * value / df_settle)
    }

    /// Spread that sets the clean upfront to zero.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the contract has no risky annuity left (every
    /// fee period ends before step-in).
    pub fn par_spread(
        &self,
        cds: &IsdaCdsDefinition,
        discount: &IsdaCurve,
        hazard: &IsdaCurve,
        dates: &CdsDates,
    ) -> Result<f64, PricingError> {
        let annuity = self.annuity(cds, discount, hazard, dates)?;
        let clean = annuity.dirty - annuity.accrued;
        if !(clean > 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "no remaining premium annuity for {}",
                cds
            )));
        }
        Ok(self.protection_leg(cds, discount, hazard, dates)? / clean)
    }

    /// Flat hazard rate under which a CDS paying `market_spread` as coupon
    /// prices at par (zero clean upfront).
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a negative or non-finite spread
    /// - `NonConvergence` when the root find exhausts its iteration cap
    pub fn hazard_rate_from_spread(
        &self,
        cds: &IsdaCdsDefinition,
        discount: &IsdaCurve,
        market_spread: f64,
        dates: &CdsDates,
    ) -> Result<f64, PricingError> {
        if !(market_spread.is_finite() && market_spread >= 0.0) {
            return Err(PricingError::InvalidArgument(format!(
                "market spread must be non-negative, got {}",
                market_spread
            )));
        }
        if market_spread == 0.0 {
            return Ok(0.0);
        }
        let par = cds.with_coupon(market_spread);
        let residual = |rate: f64| -> Result<f64, PricingError> {
            let hazard = IsdaCurve::flat("HAZARD", rate)?;
            self.upfront_charge(&par, discount, &hazard, dates, true)
        };

        let guess = market_spread / (1.0 - cds.recovery_rate());
        let (lo, hi) = expand_bracket_upward(residual, 0.0, 2.0 * guess, MAX_BRACKET_EXPANSIONS)?;
        BrentSolver::new(self.solver).try_find_root(residual, lo, hi)
    }

    /// Accrued coupon at step-in per unit coupon, and the risky annuity.
    fn annuity(
        &self,
        cds: &IsdaCdsDefinition,
        discount: &IsdaCurve,
        hazard: &IsdaCurve,
        dates: &CdsDates,
    ) -> Result<Annuity, PricingError> {
        let coupons = cds.coupons()?;
        let observation = if cds.protect_start() { -1 } else { 0 };

        let mut dirty = 0.0;
        for c in coupons.iter().filter(|c| c.accrual_end > dates.stepin_date) {
            let observed = dates.time(c.accrual_end.add_days(observation).max(dates.pricing_date));
            let q = hazard.survival_probability(observed)?;
            let p = discount.discount_factor(dates.time(c.payment_date).max(0.0))?;
            dirty += c.year_fraction * q * p;

            if cds.accrual_on_default() {
                dirty += accrual_on_default(c, observation, discount, hazard, dates)?;
            }
        }

        let accrued = coupons
            .iter()
            .find(|c| c.accrual_start <= dates.stepin_date && dates.stepin_date < c.accrual_end)
            .map(|c| cds.day_count().year_fraction(c.accrual_start, dates.stepin_date))
            .unwrap_or(0.0);

        let df_settle = discount.discount_factor(dates.time(dates.settlement_date))?;
        Ok(Annuity {
            dirty: cds.notional() * dirty / df_settle,
            accrued: cds.notional() * accrued,
        })
    }
}

/// Accrued coupon paid on default within one fee period, per unit coupon,
/// valued at the pricing date.
///
/// The accrued amount grows linearly in ACT/365F time over the period so
/// it reaches the period's year fraction at the accrual end.
fn accrual_on_default(
    coupon: &CdsCoupon,
    observation: i64,
    discount: &IsdaCurve,
    hazard: &IsdaCurve,
    dates: &CdsDates,
) -> Result<f64, PricingError> {
    let start = coupon
        .accrual_start
        .max(dates.stepin_date)
        .add_days(observation)
        .max(dates.pricing_date);
    let end = coupon.accrual_end.add_days(observation);
    if end <= start {
        return Ok(0.0);
    }

    let accrual_start = dates.time(coupon.accrual_start.add_days(observation));
    let period = dates.time(coupon.accrual_end) - dates.time(coupon.accrual_start);
    let rate = coupon.year_fraction / period;

    let mut value = 0.0;
    for (u0, u1) in timeline(discount, hazard, dates.time(start), dates.time(end)) {
        let (q0, q1) = (hazard.survival_probability(u0)?, hazard.survival_probability(u1)?);
        let (p0, p1) = (discount.discount_factor(u0)?, discount.discount_factor(u1)?);
        let lambda_dt = (q0 / q1).ln();
        let x = lambda_dt + (p0 / p1).ln();
        let elapsed = u0 - accrual_start;
        let dt = u1 - u0;
        value += lambda_dt * q0 * p0 * (elapsed * e1(x) + dt * e2(x));
    }
    Ok(rate * value)
}

/// Consecutive sub-intervals of `[t0, t1]` split at every curve node.
fn timeline(discount: &IsdaCurve, hazard: &IsdaCurve, t0: f64, t1: f64) -> Vec<(f64, f64)> {
    let mut points: Vec<f64> = discount
        .node_times_from_effective()
        .chain(hazard.node_times_from_effective())
        .filter(|&t| t > t0 && t < t1)
        .collect();
    points.push(t0);
    points.push(t1);
    points.sort_by(f64::total_cmp);
    points.dedup();
    points.windows(2).map(|w| (w[0], w[1])).collect()
}

/// `(1 - e^{-x}) / x`
fn e1(x: f64) -> f64 {
    if x.abs() < SERIES_THRESHOLD {
        // Σ (-x)^k / (k+1)!
        1.0 + x
            * (-1.0 / 2.0
                + x * (1.0 / 6.0
                    + x * (-1.0 / 24.0
                        + x * (1.0 / 120.0
                            + x * (-1.0 / 720.0 + x * (1.0 / 5040.0 - x / 40320.0))))))
    } else {
        -(-x).exp_m1() / x
    }
}

/// `(1 - (1 + x)e^{-x}) / x²`
fn e2(x: f64) -> f64 {
    if x.abs() < SERIES_THRESHOLD {
        // Σ (-x)^k (k+1) / (k+2)!
        0.5 + x
            * (-1.0 / 3.0
                + x * (1.0 / 8.0
                    + x * (-1.0 / 30.0
                        + x * (1.0 / 144.0
                            + x * (-1.0 / 840.0 + x * (1.0 / 5760.0 - x / 45360.0))))))
    } else {
        (1.0 - (1.0 + x) * (-x).exp()) / (x * x)
    }
}
