//! Currencies and currency-tagged amounts.
//!
//! Pricing methods report values as [`CurrencyAmount`] so that amounts in
//! different currencies are never added by accident.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::currency::{Currency, CurrencyAmount};
//!
//! let pv = CurrencyAmount::new(Currency::USD, 1250.0);
//! let fee = CurrencyAmount::new(Currency::USD, -50.0);
//! assert_eq!(pv.plus(&fee).unwrap().amount(), 1200.0);
//!
//! let eur = CurrencyAmount::new(Currency::EUR, 1.0);
//! assert!(pv.plus(&eur).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 currency codes traded by the rates and credit desks.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
}

impl Currency {
    /// All supported currencies, in declaration order.
    pub const ALL: [Currency; 7] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CHF,
        Currency::CAD,
        Currency::AUD,
    ];

    /// Returns the ISO 4217 three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Returns the standard number of minor-unit decimal places.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses an ISO 4217 code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in a given currency.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    currency: Currency,
    amount: f64,
}

impl CurrencyAmount {
    /// Creates an amount.
    #[inline]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Currency of the amount.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Numeric value of the amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// `CurrencyError::Mismatch` when the currencies differ.
    pub fn plus(&self, other: &CurrencyAmount) -> Result<CurrencyAmount, CurrencyError> {
        if self.currency != other.currency {
            return Err(CurrencyError::Mismatch(
                self.currency.code().to_string(),
                other.currency.code().to_string(),
            ));
        }
        Ok(CurrencyAmount::new(self.currency, self.amount + other.amount))
    }

    /// Scales the amount by `factor`.
    #[inline]
    pub fn multiplied_by(&self, factor: f64) -> CurrencyAmount {
        CurrencyAmount::new(self.currency, self.amount * factor)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places() as usize;
        write!(f, "{} {:.*}", self.currency, dp, self.amount)
    }
}
