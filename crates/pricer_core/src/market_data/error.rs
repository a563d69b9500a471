//! Market data error types.

use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Market data construction and lookup errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidDomain { t: -1.0 };
/// assert_eq!(format!("{}", err), "Time outside curve domain: t = -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Curve or surface queried at a negative time.
    #[error("Time outside curve domain: t = {t}")]
    InvalidDomain {
        /// The offending time
        t: f64,
    },

    /// Not enough nodes to build the object.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of nodes provided
        got: usize,
        /// Minimum number required
        need: usize,
    },

    /// Node times are not strictly increasing.
    #[error("Node times must be strictly increasing (violated at index {index})")]
    NonMonotonic {
        /// First index breaking monotonicity
        index: usize,
    },

    /// Malformed construction input.
    #[error("Invalid market data: {0}")]
    InvalidData(String),

    /// Named curve absent from the market bundle.
    #[error("Curve not found: {0}")]
    CurveNotFound(String),

    /// Wrapped interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::InvalidDomain { .. } => PricingError::InvalidDomain(err.to_string()),
            other => PricingError::InvalidArgument(other.to_string()),
        }
    }
}
