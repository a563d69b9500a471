//! ISDA discount curve stripping from money-market and swap quotes.

use pricer_core::market_data::curves::{IsdaCurve, YieldCurve};
use pricer_core::market_data::YieldCurveData;
use pricer_core::math::solvers::BrentSolver;
use pricer_core::types::{Date, Tenor};
use tracing::debug;

use super::{BootstrapConfig, BootstrapError};

/// Strips an [`IsdaCurve`] from [`YieldCurveData`].
///
/// Money-market pillars are closed form, `DF = 1/(1 + r·τ)` with `τ` in the
/// cash day count. Swap pillars are solved one at a time: the zero rate at
/// the swap maturity is found by Brent so that the fixed leg plus the final
/// discount factor is worth one (a spot-starting par swap), with flat
/// forwards between pillars. Rates are stored continuously compounded in
/// the curve day count from the spot date.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::YieldCurve;
/// use pricer_core::market_data::YieldCurveData;
/// use pricer_core::types::{Currency, Date, Tenor};
/// use pricer_optimiser::bootstrapping::IsdaYieldCurveBootstrapper;
///
/// let data = YieldCurveData::builder(Currency::USD, Date::from_ymd(2013, 6, 24).unwrap())
///     .cash(Tenor::months(3), 0.0027)
///     .cash(Tenor::months(6), 0.0041)
///     .swap(Tenor::years(2), 0.0049)
///     .swap(Tenor::years(5), 0.0141)
///     .build()
///     .unwrap();
///
/// let curve = IsdaYieldCurveBootstrapper::default()
///     .bootstrap("USD", &data)
///     .unwrap();
/// assert_eq!(curve.times().len(), 4);
/// assert!(curve.discount_factor(5.0).unwrap() < curve.discount_factor(2.0).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IsdaYieldCurveBootstrapper {
    config: BootstrapConfig,
    valuation_date: Option<Date>,
}

impl IsdaYieldCurveBootstrapper {
    /// Bootstrapper with the given settings.
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            valuation_date: None,
        }
    }

    /// Read the stripped curve from `date` rather than the spot date; the
    /// gap becomes the curve's offset.
    pub fn with_valuation_date(mut self, date: Date) -> Self {
        self.valuation_date = Some(date);
        self
    }

    /// Bootstrap settings.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Strip the curve.
    ///
    /// # Errors
    ///
    /// - `DuplicateMaturity` if two quotes adjust onto the same date
    /// - `InvalidInput` if a swap matures before an earlier pillar
    /// - `NegativeRate` if negative rates are disallowed and one is solved
    /// - `ConvergenceFailure` if a swap pillar exhausts its iterations
    pub fn bootstrap(
        &self,
        name: impl Into<String>,
        data: &YieldCurveData,
    ) -> Result<IsdaCurve, BootstrapError> {
        let spot = data.spot_date();
        let curve_dc = data.curve_day_count();
        let bdc = data.curve_business_day_convention();

        let mut times: Vec<f64> = Vec::new();
        let mut rates: Vec<f64> = Vec::new();

        for (tenor, &quote) in data.cash_data() {
            let maturity = bdc.adjust(tenor.add_to(spot)?, data.calendar());
            let t = curve_dc.year_fraction(spot, maturity);
            let tau = data.cash_day_count().year_fraction(spot, maturity);
            let df = 1.0 / (1.0 + quote * tau);
            let rate = -df.ln() / t;
            debug!(pillar = %tenor, t, rate, "money-market pillar");
            self.push_pillar(&mut times, &mut rates, t, rate)?;
        }

        let solver = BrentSolver::new(self.config.solver_config());
        let (lower, upper) = self.config.rate_bracket;
        for (tenor, &quote) in data.swap_data() {
            let leg = fixed_leg(data, *tenor)?;
            let t = leg[leg.len() - 1].0;
            check_after(&times, t)?;

            let mut iterations = 0usize;
            let rate = solver
                .try_find_root(
                    |rate| {
                        iterations += 1;
                        let residual = par_residual(&times, &rates, t, rate, quote, &leg)?;
                        debug!(pillar = %tenor, iteration = iterations, rate, residual, "swap pillar");
                        Ok::<f64, BootstrapError>(residual)
                    },
                    lower,
                    upper,
                )
                .map_err(|e| e.at_pillar(t))?;
            self.push_pillar(&mut times, &mut rates, t, rate)?;
        }

        let offset = match self.valuation_date {
            Some(date) => curve_dc.year_fraction(date, spot),
            None => 0.0,
        };
        Ok(IsdaCurve::new(name, times, rates, offset)?)
    }

    fn push_pillar(
        &self,
        times: &mut Vec<f64>,
        rates: &mut Vec<f64>,
        t: f64,
        rate: f64,
    ) -> Result<(), BootstrapError> {
        check_after(times, t)?;
        if rate < 0.0 && !self.config.allow_negative_rates {
            return Err(BootstrapError::NegativeRate { maturity: t, rate });
        }
        times.push(t);
        rates.push(rate);
        Ok(())
    }
}

/// Pillars must be strictly increasing and after the spot date.
fn check_after(times: &[f64], t: f64) -> Result<(), BootstrapError> {
    match times.last() {
        Some(&last) if t == last => Err(BootstrapError::DuplicateMaturity { maturity: t }),
        Some(&last) if t < last => Err(BootstrapError::invalid_input(format!(
            "pillar at {} precedes the previous pillar at {}",
            t, last
        ))),
        _ if !(t > 0.0) => Err(BootstrapError::invalid_input(format!(
            "pillar at {} does not follow the spot date",
            t
        ))),
        _ => Ok(()),
    }
}

/// Fixed leg of a spot-starting swap as (payment time, accrual) pairs; the
/// last payment is the swap maturity.
fn fixed_leg(data: &YieldCurveData, tenor: Tenor) -> Result<Vec<(f64, f64)>, BootstrapError> {
    let spot = data.spot_date();
    let interval = data.swap_fixed_leg_interval();
    if interval.amount() <= 0 {
        return Err(BootstrapError::invalid_input(format!(
            "swap fixed leg interval {} is not positive",
            interval
        )));
    }
    let end = tenor.add_to(spot)?;

    let mut unadjusted = Vec::new();
    let mut k = 1;
    loop {
        let date = interval.times(k).add_to(spot)?;
        if date >= end {
            break;
        }
        unadjusted.push(date);
        k += 1;
    }
    unadjusted.push(end);

    let bdc = data.curve_business_day_convention();
    let mut previous = spot;
    let mut leg = Vec::with_capacity(unadjusted.len());
    for date in unadjusted {
        let payment = bdc.adjust(date, data.calendar());
        leg.push((
            data.curve_day_count().year_fraction(spot, payment),
            data.swap_day_count().year_fraction(previous, payment),
        ));
        previous = payment;
    }
    Ok(leg)
}

/// Value of a unit par swap paying `quote` minus one, with the pillar at
/// `t` set to `rate`.
fn par_residual(
    times: &[f64],
    rates: &[f64],
    t: f64,
    rate: f64,
    quote: f64,
    leg: &[(f64, f64)],
) -> Result<f64, BootstrapError> {
    let mut trial_times = times.to_vec();
    let mut trial_rates = rates.to_vec();
    trial_times.push(t);
    trial_rates.push(rate);
    let curve = IsdaCurve::new("TRIAL", trial_times, trial_rates, 0.0)?;

    let mut value = 0.0;
    for &(payment, accrual) in leg {
        value += quote * accrual * curve.discount_factor(payment)?;
    }
    Ok(value + curve.discount_factor(t)? - 1.0)
}
