//! Black (1976) model on a forward.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = N·(F·Φ(d₁) - K·Φ(d₂))
//! **Put Price**: P = N·(K·Φ(-d₂) - F·Φ(-d₁))
//!
//! Where:
//! - N is the numeraire (discount factor, annuity, ...)
//! - d₁ = (ln(F/K) + σ²T/2) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Greeks are reported per unit numeraire, that is on the undiscounted
//! price `F·Φ(d₁) - K·Φ(d₂)`.
//!
//! ## Degenerate inputs
//!
//! These are value policies, not errors:
//! - `T <= 0`: price and Greeks are zero
//! - `K <= 0`: the call is the forward contract `F - K`, the put is worthless
//! - `F <= 0`: the call is worthless, the put is `K - F`
//! - `σ√T` below `1e-16` (including `σ <= 0`): intrinsic value, indicator delta

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};

/// Below this total volatility the option is valued at intrinsic.
const MIN_TOTAL_VOLATILITY: f64 = 1e-16;

/// Forward, numeraire and volatility of a single Black evaluation.
///
/// Built per pricing call; not stored on instruments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackFunctionData<T: Float> {
    /// Forward of the underlying (F)
    pub forward: T,
    /// Numeraire multiplying the undiscounted price (N)
    pub numeraire: T,
    /// Black volatility (σ)
    pub volatility: T,
}

impl<T: Float> BlackFunctionData<T> {
    /// Creates the data triple.
    pub fn new(forward: T, numeraire: T, volatility: T) -> Self {
        Self {
            forward,
            numeraire,
            volatility,
        }
    }
}

/// European payoff on a forward: strike, expiry in years and call/put flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanOption<T: Float> {
    strike: T,
    expiry: T,
    is_call: bool,
}

impl<T: Float> EuropeanOption<T> {
    /// Creates the payoff description.
    pub fn new(strike: T, expiry: T, is_call: bool) -> Self {
        Self {
            strike,
            expiry,
            is_call,
        }
    }

    /// Strike (K).
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Time to expiry in years (T).
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }

    /// True for a call, false for a put.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.is_call
    }
}

/// Price together with its first derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackPriceAdjoint<T: Float> {
    /// `N·B(F, K, T, σ)`
    pub price: T,
    /// `[∂price/∂F, ∂price/∂N, ∂price/∂σ]`
    pub derivatives: [T; 3],
}

/// Undiscounted price and Greeks of one evaluation.
#[derive(Debug, Clone, Copy)]
struct Terms<T> {
    price: T,
    delta: T,
    gamma: T,
    vega: T,
    theta: T,
}

impl<T: Float> Terms<T> {
    fn flat(price: T, delta: T) -> Self {
        Self {
            price,
            delta,
            gamma: T::zero(),
            vega: T::zero(),
            theta: T::zero(),
        }
    }
}

/// Black pricing function.
///
/// Stateless; every method is a pure function of its arguments.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackFormula, BlackFunctionData, EuropeanOption};
///
/// let call = EuropeanOption::new(0.03_f64, 2.0, true);
/// let put = EuropeanOption::new(0.03_f64, 2.0, false);
/// let data = BlackFunctionData::new(0.032, 4.5, 0.2);
///
/// let c = BlackFormula.price(&call, &data);
/// let p = BlackFormula.price(&put, &data);
///
/// // Put-call parity: C - P = N·(F - K)
/// assert!((c - p - 4.5 * (0.032 - 0.03)).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackFormula;

impl BlackFormula {
    fn terms<T: Float>(&self, option: &EuropeanOption<T>, forward: T, volatility: T) -> Terms<T> {
        let zero = T::zero();
        let one = T::one();
        let half = T::from(0.5).unwrap();
        let strike = option.strike;
        let expiry = option.expiry;

        if expiry <= zero {
            return Terms::flat(zero, zero);
        }
        if strike <= zero {
            return if option.is_call {
                Terms::flat(forward - strike, one)
            } else {
                Terms::flat(zero, zero)
            };
        }
        if forward <= zero {
            return if option.is_call {
                Terms::flat(zero, zero)
            } else {
                Terms::flat(strike - forward, -one)
            };
        }

        let sqrt_t = expiry.sqrt();
        let sigma_root_t = volatility * sqrt_t;
        if !(sigma_root_t >= T::from(MIN_TOTAL_VOLATILITY).unwrap()) {
            return match (option.is_call, forward > strike, forward < strike) {
                (true, true, _) => Terms::flat(forward - strike, one),
                (false, _, true) => Terms::flat(strike - forward, -one),
                _ => Terms::flat(zero, zero),
            };
        }

        let d1 = ((forward / strike).ln() + half * sigma_root_t * sigma_root_t) / sigma_root_t;
        let d2 = d1 - sigma_root_t;
        let pdf_d1 = norm_pdf(d1);

        let (price, delta) = if option.is_call {
            let nd1 = norm_cdf(d1);
            (forward * nd1 - strike * norm_cdf(d2), nd1)
        } else {
            let nmd1 = norm_cdf(-d1);
            (strike * norm_cdf(-d2) - forward * nmd1, -nmd1)
        };

        Terms {
            price,
            delta,
            gamma: pdf_d1 / (forward * sigma_root_t),
            vega: forward * pdf_d1 * sqrt_t,
            theta: -half * forward * pdf_d1 * volatility / sqrt_t,
        }
    }

    /// Price `N·B(F, K, T, σ)`.
    pub fn price<T: Float>(&self, option: &EuropeanOption<T>, data: &BlackFunctionData<T>) -> T {
        data.numeraire * self.terms(option, data.forward, data.volatility).price
    }

    /// `∂B/∂F` per unit numeraire.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::{BlackFormula, EuropeanOption};
    ///
    /// let call = EuropeanOption::new(0.03_f64, 1.0, true);
    /// let put = EuropeanOption::new(0.03_f64, 1.0, false);
    /// let dc = BlackFormula.delta(&call, 0.03, 0.2);
    /// let dp = BlackFormula.delta(&put, 0.03, 0.2);
    /// assert!((dc - dp - 1.0).abs() < 1e-15);
    /// ```
    pub fn delta<T: Float>(&self, option: &EuropeanOption<T>, forward: T, volatility: T) -> T {
        self.terms(option, forward, volatility).delta
    }

    /// `∂²B/∂F²` per unit numeraire.
    pub fn gamma<T: Float>(&self, option: &EuropeanOption<T>, forward: T, volatility: T) -> T {
        self.terms(option, forward, volatility).gamma
    }

    /// `∂B/∂σ` per unit numeraire.
    pub fn vega<T: Float>(&self, option: &EuropeanOption<T>, forward: T, volatility: T) -> T {
        self.terms(option, forward, volatility).vega
    }

    /// `-∂B/∂T` per unit numeraire, without drift: `-F·φ(d₁)·σ / (2√T)`.
    pub fn driftless_theta<T: Float>(
        &self,
        option: &EuropeanOption<T>,
        forward: T,
        volatility: T,
    ) -> T {
        self.terms(option, forward, volatility).theta
    }

    /// Price and `[∂/∂F, ∂/∂N, ∂/∂σ]`, computed analytically.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::{BlackFormula, BlackFunctionData, EuropeanOption};
    ///
    /// let option = EuropeanOption::new(0.03_f64, 5.0, true);
    /// let data = BlackFunctionData::new(0.03, 4.0, 0.3);
    /// let adj = BlackFormula.price_adjoint(&option, &data);
    ///
    /// assert_eq!(adj.price, BlackFormula.price(&option, &data));
    /// assert!((adj.derivatives[1] * 4.0 - adj.price).abs() < 1e-15);
    /// ```
    pub fn price_adjoint<T: Float>(
        &self,
        option: &EuropeanOption<T>,
        data: &BlackFunctionData<T>,
    ) -> BlackPriceAdjoint<T> {
        let terms = self.terms(option, data.forward, data.volatility);
        let n = data.numeraire;
        BlackPriceAdjoint {
            price: n * terms.price,
            derivatives: [n * terms.delta, terms.price, n * terms.vega],
        }
    }
}
