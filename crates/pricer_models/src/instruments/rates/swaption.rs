//! European swaption on a [`FixedCouponSwap`].
//!
//! # Types
//!
//! - **Payer**: right to pay fixed at the strike (a call on the swap rate)
//! - **Receiver**: right to receive fixed at the strike (a put on the swap rate)
//!
//! # Settlement
//!
//! - **Cash**: the intrinsic value is paid at a settlement time, computed
//!   with the cash annuity at the realised swap rate
//! - **Physical**: the swap is entered at expiry

use pricer_core::types::{Currency, PricingError};
use std::fmt;

use super::FixedCouponSwap;

/// Swaption type (payer or receiver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwaptionType {
    /// Right to enter a payer swap (pay fixed, receive floating).
    Payer,
    /// Right to enter a receiver swap (receive fixed, pay floating).
    Receiver,
}

impl SwaptionType {
    /// Payers are calls on the swap rate.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, SwaptionType::Payer)
    }
}

impl fmt::Display for SwaptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwaptionType::Payer => write!(f, "Payer"),
            SwaptionType::Receiver => write!(f, "Receiver"),
        }
    }
}

/// Long or short the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Bought.
    #[default]
    Long,
    /// Sold; every value and sensitivity changes sign.
    Short,
}

impl Position {
    /// `1.0` for long, `-1.0` for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }
}

/// How the swaption settles at expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwaptionSettlement {
    /// Cash payment at `settlement_time` (years).
    Cash {
        /// Payment time of the cash amount.
        settlement_time: f64,
    },
    /// Delivery of the underlying swap.
    Physical,
}

/// European swaption.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_models::instruments::rates::{
///     FixedCouponSwap, Position, Swaption, SwaptionSettlement, SwaptionType,
/// };
/// use pricer_models::schedules::Frequency;
///
/// let swap = FixedCouponSwap::regular(Currency::EUR, 1.0e6, 2.0, 5, Frequency::Annual, 2, "DSC", "FWD")
///     .unwrap();
/// let swaption = Swaption::new(
///     swap,
///     2.0,
///     0.03,
///     SwaptionType::Payer,
///     Position::Long,
///     SwaptionSettlement::Cash { settlement_time: 2.0 },
/// )
/// .unwrap();
///
/// assert!((swaption.tenor() - 5.0).abs() < 1e-12);
/// assert_eq!(swaption.currency(), Currency::EUR);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swaption {
    underlying: FixedCouponSwap,
    expiry_time: f64,
    strike: f64,
    swaption_type: SwaptionType,
    position: Position,
    settlement: SwaptionSettlement,
}

impl Swaption {
    /// Creates a swaption.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the expiry or strike is not finite, or the
    /// settlement time is not finite.
    pub fn new(
        underlying: FixedCouponSwap,
        expiry_time: f64,
        strike: f64,
        swaption_type: SwaptionType,
        position: Position,
        settlement: SwaptionSettlement,
    ) -> Result<Self, PricingError> {
        if !expiry_time.is_finite() || !strike.is_finite() {
            return Err(PricingError::InvalidArgument(format!(
                "swaption expiry {} and strike {} must be finite",
                expiry_time, strike
            )));
        }
        if let SwaptionSettlement::Cash { settlement_time } = settlement {
            if !(settlement_time.is_finite() && settlement_time >= 0.0) {
                return Err(PricingError::InvalidArgument(format!(
                    "settlement time must be non-negative, got {}",
                    settlement_time
                )));
            }
        }
        Ok(Self {
            underlying,
            expiry_time,
            strike,
            swaption_type,
            position,
            settlement,
        })
    }

    /// The swap delivered or cash-settled at expiry.
    #[inline]
    pub fn underlying(&self) -> &FixedCouponSwap {
        &self.underlying
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry_time(&self) -> f64 {
        self.expiry_time
    }

    /// Strike rate.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Payer or receiver.
    #[inline]
    pub fn swaption_type(&self) -> SwaptionType {
        self.swaption_type
    }

    /// Long or short.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Settlement convention.
    #[inline]
    pub fn settlement(&self) -> SwaptionSettlement {
        self.settlement
    }

    /// Currency of the underlying.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.underlying.currency()
    }

    /// Time at which the settlement takes place: the cash settlement time,
    /// or the start of the delivered swap.
    pub fn settlement_time(&self) -> f64 {
        match self.settlement {
            SwaptionSettlement::Cash { settlement_time } => settlement_time,
            SwaptionSettlement::Physical => self.underlying.start_time(),
        }
    }

    /// Tenor used on the volatility surface: last fixed payment time less
    /// the settlement time.
    pub fn tenor(&self) -> f64 {
        self.underlying.last_fixed_payment_time() - self.settlement_time()
    }

    /// Same contract with the opposite position.
    pub fn opposite(&self) -> Self {
        let position = match self.position {
            Position::Long => Position::Short,
            Position::Short => Position::Long,
        };
        Self {
            position,
            ..self.clone()
        }
    }
}

impl fmt::Display for Swaption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settle = match self.settlement {
            SwaptionSettlement::Cash { .. } => "cash",
            SwaptionSettlement::Physical => "physical",
        };
        write!(
            f,
            "{:?} {} {}y x {}y @ {} ({})",
            self.position,
            self.swaption_type,
            self.expiry_time,
            self.tenor(),
            self.strike,
            settle
        )
    }
}
