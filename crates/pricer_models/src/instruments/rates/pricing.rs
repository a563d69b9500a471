//! Black pricing of cash- and physically-settled swaptions.
//!
//! # Numeraires
//!
//! - Cash: `DF(settlement) × cash_annuity(F)`
//! - Physical: `Σ N·τᵢ·DF(tᵢ)` over the fixed leg
//!
//! Curve sensitivities are with respect to continuously compounded zero
//! rates at the times the pricer reads each curve. Volatility
//! sensitivities are keyed by (expiry, tenor).

use pricer_core::market_data::curves::YieldCurve;
use pricer_core::market_data::surfaces::SwaptionVolatilitySurface;
use pricer_core::market_data::{
    CurveSensitivity, CurveSensitivityBuilder, MarketBundle, SurfacePoint, VolatilitySensitivity,
};
use pricer_core::types::{CurrencyAmount, PricingError};

use super::{Swaption, SwaptionSettlement};
use crate::analytical::{BlackFormula, BlackFunctionData, EuropeanOption};

/// Everything one pricing call reads from the market.
#[derive(Debug, Clone, Copy)]
struct BlackInputs {
    option: EuropeanOption<f64>,
    forward: f64,
    volatility: f64,
    numeraire: f64,
    sign: f64,
}

impl BlackInputs {
    fn data(&self) -> BlackFunctionData<f64> {
        BlackFunctionData::new(self.forward, self.numeraire, self.volatility)
    }
}

/// Black method for European swaptions.
///
/// Stateless; every method is a pure function of the swaption and the
/// market bundle. Short positions negate every result.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::market_data::surfaces::FlatSwaptionVolatility;
/// use pricer_core::market_data::MarketBundle;
/// use pricer_core::types::Currency;
/// use pricer_models::instruments::rates::{
///     FixedCouponSwap, Position, Swaption, SwaptionBlackMethod, SwaptionSettlement, SwaptionType,
/// };
/// use pricer_models::schedules::Frequency;
///
/// let bundle = MarketBundle::builder()
///     .curve("USD", FlatCurve::new(0.03_f64))
///     .swaption_volatility(FlatSwaptionVolatility::new(0.2_f64))
///     .build()
///     .unwrap();
/// let swap = FixedCouponSwap::regular(Currency::USD, 1.0e6, 1.0, 5, Frequency::SemiAnnual, 4, "USD", "USD")
///     .unwrap();
/// let long = Swaption::new(swap, 1.0, 0.03, SwaptionType::Payer, Position::Long, SwaptionSettlement::Physical)
///     .unwrap();
///
/// let pv = SwaptionBlackMethod.present_value(&long, &bundle).unwrap();
/// let pv_short = SwaptionBlackMethod.present_value(&long.opposite(), &bundle).unwrap();
/// assert!(pv.amount() > 0.0);
/// assert_eq!(pv.amount(), -pv_short.amount());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwaptionBlackMethod;

impl SwaptionBlackMethod {
    fn inputs(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<BlackInputs, PricingError> {
        let volatility = self.implied_volatility(swaption, bundle)?;
        let swap = swaption.underlying();
        let forward = swap.par_rate(bundle)?;
        if !forward.is_finite() {
            return Err(PricingError::InvalidArgument(format!(
                "swap forward rate is not finite: {}",
                forward
            )));
        }

        let numeraire = match swaption.settlement() {
            SwaptionSettlement::Cash { settlement_time } => {
                let df = bundle
                    .curve(swap.discount_curve())?
                    .discount_factor(settlement_time)?;
                df * swap.cash_annuity(forward)
            }
            SwaptionSettlement::Physical => swap.annuity(bundle)?,
        };

        Ok(BlackInputs {
            option: EuropeanOption::new(
                swaption.strike(),
                swaption.expiry_time(),
                swaption.swaption_type().is_call(),
            ),
            forward,
            volatility,
            numeraire,
            sign: swaption.position().sign(),
        })
    }

    /// Black volatility read from the bundle's surface at
    /// `(expiry, tenor)`. Expired options read the surface at expiry zero.
    ///
    /// # Errors
    ///
    /// `UnsupportedConfiguration` if the bundle has no swaption surface.
    pub fn implied_volatility(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<f64, PricingError> {
        let surface = bundle.swaption_volatility().ok_or_else(|| {
            PricingError::UnsupportedConfiguration(
                "Black swaption pricing needs a swaption volatility surface".to_string(),
            )
        })?;
        Ok(surface.volatility(swaption.expiry_time().max(0.0), swaption.tenor())?)
    }

    /// Present value in the swaption's currency.
    pub fn present_value(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<CurrencyAmount, PricingError> {
        let inputs = self.inputs(swaption, bundle)?;
        let pv = BlackFormula.price(&inputs.option, &inputs.data());
        Ok(CurrencyAmount::new(swaption.currency(), inputs.sign * pv))
    }

    /// Sensitivity of the present value to the zero rates of the discount
    /// and forward curves, by chain rule through the forward and the
    /// numeraire.
    pub fn present_value_curve_sensitivity(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<CurveSensitivity, PricingError> {
        let inputs = self.inputs(swaption, bundle)?;
        let swap = swaption.underlying();
        let forward_dr = swap.par_rate_curve_sensitivity(bundle)?;

        let sensitivity = match swaption.settlement() {
            SwaptionSettlement::Cash { settlement_time } => {
                let df_settle = bundle
                    .curve(swap.discount_curve())?
                    .discount_factor(settlement_time)?;
                let pvbp = swap.cash_annuity(inputs.forward);
                let pvbp_dr = swap.cash_annuity_derivative(inputs.forward);
                // price and forward derivative per unit numeraire
                let unit = BlackFunctionData::new(inputs.forward, 1.0, inputs.volatility);
                let adj = BlackFormula.price_adjoint(&inputs.option, &unit);

                CurveSensitivityBuilder::new()
                    .add(
                        swap.discount_curve(),
                        settlement_time,
                        -settlement_time * df_settle * pvbp * adj.price,
                    )
                    .add_scaled(
                        &forward_dr,
                        df_settle * (pvbp_dr * adj.price + pvbp * adj.derivatives[0]),
                    )
                    .build()
            }
            SwaptionSettlement::Physical => {
                let annuity_dr = swap.annuity_curve_sensitivity(bundle)?;
                let adj = BlackFormula.price_adjoint(&inputs.option, &inputs.data());
                CurveSensitivityBuilder::new()
                    .add_scaled(&forward_dr, adj.derivatives[0])
                    .add_scaled(&annuity_dr, adj.derivatives[1])
                    .build()
            }
        };

        Ok(sensitivity.multiplied_by(inputs.sign))
    }

    /// Sensitivity of the present value to the Black volatility, keyed by
    /// the swaption's (expiry, tenor).
    pub fn present_value_volatility_sensitivity(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<VolatilitySensitivity, PricingError> {
        let inputs = self.inputs(swaption, bundle)?;
        let adj = BlackFormula.price_adjoint(&inputs.option, &inputs.data());
        Ok(VolatilitySensitivity::of(
            SurfacePoint::new(swaption.expiry_time(), swaption.tenor()),
            inputs.sign * adj.derivatives[2],
        ))
    }

    /// `∂PV/∂F`: numeraire times the Black delta.
    pub fn delta_theoretical(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, bundle)?;
        Ok(i.sign * i.numeraire * BlackFormula.delta(&i.option, i.forward, i.volatility))
    }

    /// `∂²PV/∂F²`: numeraire times the Black gamma.
    pub fn gamma_theoretical(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, bundle)?;
        Ok(i.sign * i.numeraire * BlackFormula.gamma(&i.option, i.forward, i.volatility))
    }

    /// `∂PV/∂σ`: numeraire times the Black vega.
    pub fn vega_theoretical(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, bundle)?;
        Ok(i.sign * i.numeraire * BlackFormula.vega(&i.option, i.forward, i.volatility))
    }

    /// Theta.
    ///
    /// Physical: numeraire times the driftless theta. Cash:
    /// `F·df·Δ + df·θ`, with `df` the cash numeraire.
    pub fn theta_theoretical(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, bundle)?;
        let theta = BlackFormula.driftless_theta(&i.option, i.forward, i.volatility);
        let value = match swaption.settlement() {
            SwaptionSettlement::Cash { .. } => {
                let delta = BlackFormula.delta(&i.option, i.forward, i.volatility);
                i.forward * i.numeraire * delta + i.numeraire * theta
            }
            SwaptionSettlement::Physical => i.numeraire * theta,
        };
        Ok(i.sign * value)
    }

    /// Spot delta of a physical swaption: forward delta times the annuity
    /// plus the price times the annuity's response to a parallel move of
    /// the forward. Cash swaptions return zero.
    pub fn spot_delta_theoretical(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<f64, PricingError> {
        if let SwaptionSettlement::Cash { .. } = swaption.settlement() {
            return Ok(0.0);
        }
        let i = self.inputs(swaption, bundle)?;
        let swap = swaption.underlying();

        let forward_shift = parallel_total(&swap.par_rate_curve_sensitivity(bundle)?);
        let annuity_shift = parallel_total(&swap.annuity_curve_sensitivity(bundle)?);

        let delta = BlackFormula.delta(&i.option, i.forward, i.volatility);
        let unit = BlackFunctionData::new(i.forward, 1.0, i.volatility);
        let price = BlackFormula.price(&i.option, &unit);
        let annuity_per_forward = if forward_shift != 0.0 {
            annuity_shift / forward_shift
        } else {
            0.0
        };
        Ok(i.sign * (i.numeraire * delta + price * annuity_per_forward))
    }

    /// [`delta_theoretical`](Self::delta_theoretical) as a currency amount.
    pub fn delta(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<CurrencyAmount, PricingError> {
        self.delta_theoretical(swaption, bundle)
            .map(|v| CurrencyAmount::new(swaption.currency(), v))
    }

    /// [`gamma_theoretical`](Self::gamma_theoretical) as a currency amount.
    pub fn gamma(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<CurrencyAmount, PricingError> {
        self.gamma_theoretical(swaption, bundle)
            .map(|v| CurrencyAmount::new(swaption.currency(), v))
    }

    /// [`theta_theoretical`](Self::theta_theoretical) as a currency amount.
    pub fn theta(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<CurrencyAmount, PricingError> {
        self.theta_theoretical(swaption, bundle)
            .map(|v| CurrencyAmount::new(swaption.currency(), v))
    }

    /// [`vega_theoretical`](Self::vega_theoretical) as a currency amount.
    pub fn vega(
        &self,
        swaption: &Swaption,
        bundle: &MarketBundle,
    ) -> Result<CurrencyAmount, PricingError> {
        self.vega_theoretical(swaption, bundle)
            .map(|v| CurrencyAmount::new(swaption.currency(), v))
    }
}

/// Response to the same shift of every zero rate on every curve.
fn parallel_total(sensitivity: &CurveSensitivity) -> f64 {
    sensitivity
        .iter()
        .map(|(_, points)| points.iter().map(|(_, v)| v).sum::<f64>())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::rates::{FixedCouponSwap, Position, SwaptionType};
    use crate::schedules::Frequency;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::{Extrapolation, InterpolatedCurve, ZeroInterpolation};
    use pricer_core::market_data::surfaces::FlatSwaptionVolatility;
    use pricer_core::types::Currency;

    const DSC: [f64; 4] = [0.02, 0.022, 0.026, 0.03];
    const FWD: [f64; 4] = [0.025, 0.027, 0.031, 0.034];
    const VOL: f64 = 0.25;

    fn bundle_with(dsc: &[f64], fwd: &[f64], vol: f64) -> MarketBundle {
        let times = [0.5, 2.0, 5.0, 10.0];
        let build = |r: &[f64]| {
            InterpolatedCurve::new(&times, r, ZeroInterpolation::Linear, Extrapolation::Flat)
                .unwrap()
        };
        MarketBundle::builder()
            .curve("DSC", build(dsc))
            .curve("FWD", build(fwd))
            .discount_curve(Currency::EUR, "DSC")
            .swaption_volatility(FlatSwaptionVolatility::new(vol))
            .build()
            .unwrap()
    }

    fn bundle() -> MarketBundle {
        bundle_with(&DSC, &FWD, VOL)
    }

    fn shifted(rates: &[f64], h: f64) -> Vec<f64> {
        rates.iter().map(|r| r + h).collect()
    }

    fn swaption(kind: SwaptionType, settlement: SwaptionSettlement) -> Swaption {
        let swap = FixedCouponSwap::regular(Currency::EUR, 1.0e6, 2.0, 5, Frequency::Annual, 2, "DSC", "FWD")
            .unwrap();
        Swaption::new(swap, 2.0, 0.03, kind, Position::Long, settlement).unwrap()
    }

    fn settlements() -> [SwaptionSettlement; 2] {
        [
            SwaptionSettlement::Cash { settlement_time: 2.0 },
            SwaptionSettlement::Physical,
        ]
    }

    // ==========================================================
    // Present value
    // ==========================================================

    #[test]
    fn test_put_call_parity_physical() {
        let bundle = bundle();
        let payer = swaption(SwaptionType::Payer, SwaptionSettlement::Physical);
        let receiver = swaption(SwaptionType::Receiver, SwaptionSettlement::Physical);
        let swap = payer.underlying();
        let forward = swap.par_rate(&bundle).unwrap();
        let annuity = swap.annuity(&bundle).unwrap();

        let c = SwaptionBlackMethod.present_value(&payer, &bundle).unwrap().amount();
        let p = SwaptionBlackMethod.present_value(&receiver, &bundle).unwrap().amount();
        assert_relative_eq!(c - p, annuity * (forward - 0.03), max_relative = 1e-9);
    }

    #[test]
    fn test_put_call_parity_cash() {
        let bundle = bundle();
        let settle = SwaptionSettlement::Cash { settlement_time: 2.0 };
        let payer = swaption(SwaptionType::Payer, settle);
        let receiver = swaption(SwaptionType::Receiver, settle);
        let swap = payer.underlying();
        let forward = swap.par_rate(&bundle).unwrap();
        let df = bundle.curve("DSC").unwrap().discount_factor(2.0).unwrap();
        let numeraire = df * swap.cash_annuity(forward);

        let c = SwaptionBlackMethod.present_value(&payer, &bundle).unwrap().amount();
        let p = SwaptionBlackMethod.present_value(&receiver, &bundle).unwrap().amount();
        assert_relative_eq!(c - p, numeraire * (forward - 0.03), max_relative = 1e-9);
    }

    #[test]
    fn test_short_negates_everything() {
        let bundle = bundle();
        let m = SwaptionBlackMethod;
        for settlement in settlements() {
            let long = swaption(SwaptionType::Payer, settlement);
            let short = long.opposite();

            let pv_long = m.present_value(&long, &bundle).unwrap();
            let pv_short = m.present_value(&short, &bundle).unwrap();
            assert_eq!(pv_long.amount(), -pv_short.amount());
            assert_eq!(pv_long.currency(), Currency::EUR);

            assert_eq!(
                m.delta_theoretical(&long, &bundle).unwrap(),
                -m.delta_theoretical(&short, &bundle).unwrap()
            );
            assert_eq!(
                m.gamma(&long, &bundle).unwrap().amount(),
                -m.gamma(&short, &bundle).unwrap().amount()
            );
            assert_eq!(
                m.theta(&long, &bundle).unwrap().amount(),
                -m.theta(&short, &bundle).unwrap().amount()
            );

            let vs_long = m.present_value_volatility_sensitivity(&long, &bundle).unwrap();
            let vs_short = m.present_value_volatility_sensitivity(&short, &bundle).unwrap();
            assert_eq!(vs_long.total(), -vs_short.total());

            let cs_long = m.present_value_curve_sensitivity(&long, &bundle).unwrap();
            let cs_short = m.present_value_curve_sensitivity(&short, &bundle).unwrap();
            assert_eq!(cs_long.total("DSC"), -cs_short.total("DSC"));
            assert_eq!(cs_long.total("FWD"), -cs_short.total("FWD"));
        }
    }

    #[test]
    fn test_expired_swaption_is_worthless() {
        let bundle = bundle();
        let swap = FixedCouponSwap::regular(Currency::EUR, 1.0, 2.0, 5, Frequency::Annual, 2, "DSC", "FWD")
            .unwrap();
        let expired = Swaption::new(
            swap,
            -0.1,
            0.01,
            SwaptionType::Payer,
            Position::Long,
            SwaptionSettlement::Physical,
        )
        .unwrap();
        assert_eq!(SwaptionBlackMethod.present_value(&expired, &bundle).unwrap().amount(), 0.0);
    }

    #[test]
    fn test_missing_surface_is_unsupported() {
        let bundle = MarketBundle::builder()
            .curve("DSC", pricer_core::market_data::curves::FlatCurve::new(0.02_f64))
            .curve("FWD", pricer_core::market_data::curves::FlatCurve::new(0.02_f64))
            .build()
            .unwrap();
        let s = swaption(SwaptionType::Payer, SwaptionSettlement::Physical);
        let result = SwaptionBlackMethod.present_value(&s, &bundle);
        assert!(matches!(result, Err(PricingError::UnsupportedConfiguration(_))));
    }

    // ==========================================================
    // Sensitivities against bumped markets
    // ==========================================================

    #[test]
    fn test_curve_sensitivity_against_parallel_bumps() {
        let h = 1e-6;
        for kind in [SwaptionType::Payer, SwaptionType::Receiver] {
            for settlement in settlements() {
                let s = swaption(kind, settlement);
                let sens = SwaptionBlackMethod
                    .present_value_curve_sensitivity(&s, &bundle())
                    .unwrap();
                let pv = |dsc: &[f64], fwd: &[f64]| {
                    SwaptionBlackMethod
                        .present_value(&s, &bundle_with(dsc, fwd, VOL))
                        .unwrap()
                        .amount()
                };

                let fd_dsc = (pv(&shifted(&DSC, h), &FWD) - pv(&shifted(&DSC, -h), &FWD)) / (2.0 * h);
                let fd_fwd = (pv(&DSC, &shifted(&FWD, h)) - pv(&DSC, &shifted(&FWD, -h))) / (2.0 * h);
                assert_relative_eq!(sens.total("DSC"), fd_dsc, max_relative = 1e-5, epsilon = 1e-2);
                assert_relative_eq!(sens.total("FWD"), fd_fwd, max_relative = 1e-5, epsilon = 1e-2);
            }
        }
    }

    // every time the 2y x 5y swap reads from either curve
    const NODES: [f64; 11] = [2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0];

    fn node_bundle(dsc: &[f64], fwd: &[f64]) -> MarketBundle {
        let build = |r: &[f64]| {
            InterpolatedCurve::new(&NODES, r, ZeroInterpolation::Linear, Extrapolation::Flat)
                .unwrap()
        };
        MarketBundle::builder()
            .curve("DSC", build(dsc))
            .curve("FWD", build(fwd))
            .discount_curve(Currency::EUR, "DSC")
            .swaption_volatility(FlatSwaptionVolatility::new(VOL))
            .build()
            .unwrap()
    }

    fn node_rates(base: f64, slope: f64) -> Vec<f64> {
        NODES.iter().map(|t| base + slope * t).collect()
    }

    fn reported_at(sens: &CurveSensitivity, curve: &str, time: f64) -> f64 {
        sens.curve(curve)
            .unwrap_or(&[])
            .iter()
            .filter(|(t, _)| *t == time)
            .map(|(_, v)| v)
            .sum()
    }

    #[test]
    fn test_curve_sensitivity_by_node_time() {
        let h = 1e-6;
        let dsc = node_rates(0.018, 0.0015);
        let fwd = node_rates(0.022, 0.0017);

        for kind in [SwaptionType::Payer, SwaptionType::Receiver] {
            for settlement in settlements() {
                let s = swaption(kind, settlement);
                let sens = SwaptionBlackMethod
                    .present_value_curve_sensitivity(&s, &node_bundle(&dsc, &fwd))
                    .unwrap();
                let pv = |dsc: &[f64], fwd: &[f64]| {
                    SwaptionBlackMethod
                        .present_value(&s, &node_bundle(dsc, fwd))
                        .unwrap()
                        .amount()
                };

                // nothing is reported away from the nodes
                for curve in ["DSC", "FWD"] {
                    for (t, _) in sens.curve(curve).unwrap() {
                        assert!(NODES.contains(t), "{} reported at {}", curve, t);
                    }
                }

                for (i, &t) in NODES.iter().enumerate() {
                    let bump = |rates: &[f64], h: f64| {
                        let mut bumped = rates.to_vec();
                        bumped[i] += h;
                        bumped
                    };
                    let fd_dsc = (pv(&bump(&dsc, h), &fwd) - pv(&bump(&dsc, -h), &fwd)) / (2.0 * h);
                    let fd_fwd = (pv(&dsc, &bump(&fwd, h)) - pv(&dsc, &bump(&fwd, -h))) / (2.0 * h);
                    assert_relative_eq!(
                        reported_at(&sens, "DSC", t),
                        fd_dsc,
                        max_relative = 1e-6,
                        epsilon = 1e-3
                    );
                    assert_relative_eq!(
                        reported_at(&sens, "FWD", t),
                        fd_fwd,
                        max_relative = 1e-6,
                        epsilon = 1e-3
                    );
                }
            }
        }
    }

    #[test]
    fn test_cash_settlement_time_carries_discount_sensitivity() {
        let dsc = node_rates(0.018, 0.0015);
        let fwd = node_rates(0.022, 0.0017);
        let bundle = node_bundle(&dsc, &fwd);
        let cash = swaption(SwaptionType::Payer, SwaptionSettlement::Cash { settlement_time: 2.0 });
        let physical = swaption(SwaptionType::Payer, SwaptionSettlement::Physical);

        let cash_sens = SwaptionBlackMethod.present_value_curve_sensitivity(&cash, &bundle).unwrap();
        let physical_sens = SwaptionBlackMethod
            .present_value_curve_sensitivity(&physical, &bundle)
            .unwrap();
        // cash discounts from the settlement date, physical never reads DSC there
        assert!(reported_at(&cash_sens, "DSC", 2.0) < 0.0);
        assert_eq!(reported_at(&physical_sens, "DSC", 2.0), 0.0);
    }

    #[test]
    fn test_vega_against_volatility_bump() {
        let h = 1e-6;
        for settlement in settlements() {
            let s = swaption(SwaptionType::Receiver, settlement);
            let pv = |vol: f64| {
                SwaptionBlackMethod
                    .present_value(&s, &bundle_with(&DSC, &FWD, vol))
                    .unwrap()
                    .amount()
            };
            let fd = (pv(VOL + h) - pv(VOL - h)) / (2.0 * h);

            let sens = SwaptionBlackMethod
                .present_value_volatility_sensitivity(&s, &bundle())
                .unwrap();
            let point = SurfacePoint::new(2.0, s.tenor());
            assert_relative_eq!(sens.get(point).unwrap(), fd, max_relative = 1e-6);
            assert_relative_eq!(
                SwaptionBlackMethod.vega_theoretical(&s, &bundle()).unwrap(),
                fd,
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn test_implied_volatility_passes_through() {
        let s = swaption(SwaptionType::Payer, SwaptionSettlement::Physical);
        assert_eq!(SwaptionBlackMethod.implied_volatility(&s, &bundle()).unwrap(), VOL);
    }

    #[test]
    fn test_greek_signs() {
        let bundle = bundle();
        let payer = swaption(SwaptionType::Payer, SwaptionSettlement::Physical);
        let receiver = swaption(SwaptionType::Receiver, SwaptionSettlement::Physical);
        let m = SwaptionBlackMethod;
        assert!(m.delta_theoretical(&payer, &bundle).unwrap() > 0.0);
        assert!(m.delta_theoretical(&receiver, &bundle).unwrap() < 0.0);
        assert!(m.gamma_theoretical(&payer, &bundle).unwrap() > 0.0);
        assert!(m.vega(&receiver, &bundle).unwrap().amount() > 0.0);
        assert!(m.theta_theoretical(&payer, &bundle).unwrap() < 0.0);
    }

    #[test]
    fn test_spot_delta() {
        let bundle = bundle();
        let cash = swaption(SwaptionType::Payer, SwaptionSettlement::Cash { settlement_time: 2.0 });
        assert_eq!(SwaptionBlackMethod.spot_delta_theoretical(&cash, &bundle).unwrap(), 0.0);

        // the annuity falls as rates rise, so the spot delta sits below the forward delta
        let physical = swaption(SwaptionType::Payer, SwaptionSettlement::Physical);
        let spot = SwaptionBlackMethod.spot_delta_theoretical(&physical, &bundle).unwrap();
        let forward = SwaptionBlackMethod.delta_theoretical(&physical, &bundle).unwrap();
        assert!(spot < forward);
        assert!(spot > 0.0);
    }
}
