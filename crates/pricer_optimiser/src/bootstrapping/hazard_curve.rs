//! Term-structure hazard curve stripping from par CDS spreads.

use pricer_core::market_data::curves::IsdaCurve;
use pricer_core::math::solvers::{expand_bracket_upward, BrentSolver};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::credit::{CdsDates, IsdaCdsDefinition, IsdaCdsMethod};
use tracing::debug;

use super::{BootstrapConfig, BootstrapError};

/// Doublings allowed when bracketing a pillar hazard rate.
const MAX_BRACKET_EXPANSIONS: usize = 60;

/// A par spread quote for the CDS maturing on `maturity`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CdsQuote {
    /// Contract maturity.
    pub maturity: Date,
    /// Par spread as a decimal (0.01 = 100bp).
    pub spread: f64,
}

impl CdsQuote {
    /// Quote for `maturity` at `spread`.
    pub fn new(maturity: Date, spread: f64) -> Self {
        Self { maturity, spread }
    }
}

/// Strips a hazard [`IsdaCurve`] from par spreads, one pillar per quote.
///
/// Pillar `i` sits at the ACT/365F time of the `i`-th maturity from the
/// pricing date. Its rate is the one that prices the template contract,
/// rolled to that maturity with the quoted spread as coupon, at zero clean
/// upfront, holding the earlier pillars fixed. A quote only sees the curve
/// up to its own maturity, so earlier quotes keep repricing as later
/// pillars are added.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::{CreditCurve, IsdaCurve};
/// use pricer_core::types::{Date, WeekendCalendar};
/// use pricer_models::instruments::credit::{CdsDates, IsdaCdsDefinition};
/// use pricer_optimiser::bootstrapping::{CdsQuote, HazardCurveBootstrapper};
///
/// let template = IsdaCdsDefinition::builder(
///     Date::from_ymd(2013, 3, 20).unwrap(),
///     Date::from_ymd(2018, 6, 20).unwrap(),
/// )
/// .notional(1.0e7)
/// .build()
/// .unwrap();
/// let dates = CdsDates::standard(Date::from_ymd(2013, 6, 20).unwrap(), &WeekendCalendar);
/// let discount = IsdaCurve::flat("USD", 0.02).unwrap();
/// let quotes = [
///     CdsQuote::new(Date::from_ymd(2015, 6, 20).unwrap(), 0.008),
///     CdsQuote::new(Date::from_ymd(2018, 6, 20).unwrap(), 0.012),
/// ];
///
/// let hazard = HazardCurveBootstrapper::default()
///     .bootstrap("ACME", &template, &quotes, &discount, &dates)
///     .unwrap();
/// assert!(hazard.survival_probability(5.0).unwrap() < hazard.survival_probability(2.0).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HazardCurveBootstrapper {
    config: BootstrapConfig,
}

impl HazardCurveBootstrapper {
    /// Bootstrapper with the given settings.
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Bootstrap settings.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Strip the hazard curve.
    ///
    /// `discount` must be read from `dates.pricing_date`, as for
    /// [`IsdaCdsMethod`].
    ///
    /// # Errors
    ///
    /// - `InsufficientData` for an empty quote list
    /// - `InvalidInput` for a negative or non-finite spread, or maturities
    ///   that are not strictly increasing after the pricing date
    /// - `Solver(NoBracket)` when no non-negative hazard reprices a quote
    /// - `ConvergenceFailure` if a pillar exhausts its iterations
    pub fn bootstrap(
        &self,
        name: impl Into<String>,
        template: &IsdaCdsDefinition,
        quotes: &[CdsQuote],
        discount: &IsdaCurve,
        dates: &CdsDates,
    ) -> Result<IsdaCurve, BootstrapError> {
        if quotes.is_empty() {
            return Err(BootstrapError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }
        let mut previous = dates.pricing_date;
        for quote in quotes {
            if !(quote.spread >= 0.0) || !quote.spread.is_finite() {
                return Err(BootstrapError::invalid_input(format!(
                    "spread {} for {} is not a non-negative number",
                    quote.spread, quote.maturity
                )));
            }
            if quote.maturity <= previous {
                return Err(BootstrapError::invalid_input(format!(
                    "maturity {} does not follow {}",
                    quote.maturity, previous
                )));
            }
            previous = quote.maturity;
        }

        let method = IsdaCdsMethod::new(self.config.solver_config());
        let solver = BrentSolver::new(self.config.solver_config());
        let times: Vec<f64> = quotes
            .iter()
            .map(|q| DayCountConvention::Actual365Fixed.year_fraction(dates.pricing_date, q.maturity))
            .collect();
        let mut rates: Vec<f64> = Vec::with_capacity(quotes.len());

        for (i, quote) in quotes.iter().enumerate() {
            let t = times[i];
            let cds = template
                .with_maturity(quote.maturity)
                .with_coupon(quote.spread);

            let mut iterations = 0usize;
            let mut residual = |rate: f64| {
                iterations += 1;
                let mut trial = rates.clone();
                trial.push(rate);
                let hazard = IsdaCurve::new("TRIAL", times[..=i].to_vec(), trial, 0.0)?;
                let upfront = method.upfront_charge(&cds, discount, &hazard, dates, true)?;
                debug!(pillar = %quote.maturity, iteration = iterations, rate, upfront, "hazard pillar");
                Ok::<f64, BootstrapError>(upfront)
            };

            // zero hazard with a zero spread is already at par
            let rate = if residual(0.0)? == 0.0 {
                0.0
            } else {
                let guess = (2.0 * quote.spread / (1.0 - cds.recovery_rate())).max(1e-4);
                let (lo, hi) =
                    expand_bracket_upward(&mut residual, 0.0, guess, MAX_BRACKET_EXPANSIONS)?;
                solver
                    .try_find_root(&mut residual, lo, hi)
                    .map_err(|e| e.at_pillar(t))?
            };
            rates.push(rate);
        }

        Ok(IsdaCurve::new(name, times, rates, 0.0)?)
    }
}
