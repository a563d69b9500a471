//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors surfaced by pricing methods
//! - `DateError`: Errors from date construction, parsing and tenor handling
//! - `CurrencyError`: Errors from currency parsing
//! - `InterpolationError`: Errors from interpolation operations
//! - `SolverError`: Errors from root-finding solvers

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Every pricing entry point validates its inputs eagerly and reports one of
/// these kinds. No partial results are returned alongside an error.
///
/// # Variants
/// - `InvalidArgument`: Missing, negative-time or otherwise malformed input
/// - `InvalidDomain`: A curve or surface queried outside its domain
/// - `UnsupportedConfiguration`: The market data bundle lacks a required component
/// - `NonConvergence`: A calibration root-find hit its iteration cap
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidArgument("negative notional".to_string());
/// assert_eq!(format!("{}", err), "Invalid argument: negative notional");
///
/// let err = PricingError::NonConvergence { iterations: 100 };
/// assert_eq!(format!("{}", err), "No convergence after 100 iterations");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidArgument(String),

    /// Query outside the domain of a curve or surface
    InvalidDomain(String),

    /// Market data bundle does not carry what the method needs
    UnsupportedConfiguration(String),

    /// Root-find exhausted its iteration budget
    NonConvergence {
        /// Number of iterations attempted
        iterations: usize,
    },
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PricingError::InvalidDomain(msg) => write!(f, "Invalid domain: {}", msg),
            PricingError::UnsupportedConfiguration(msg) => {
                write!(f, "Unsupported configuration: {}", msg)
            }
            PricingError::NonConvergence { iterations } => {
                write!(f, "No convergence after {} iterations", iterations)
            }
        }
    }
}

impl std::error::Error for PricingError {}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded { iterations } => {
                PricingError::NonConvergence { iterations }
            }
            other => PricingError::InvalidArgument(other.to_string()),
        }
    }
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse a date or tenor string
/// - `Overflow`: Date arithmetic left the representable range
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date or tenor string.
    ParseError(String),

    /// Date arithmetic overflow.
    Overflow(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
            DateError::Overflow(msg) => write!(f, "Date overflow: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Currency-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    UnknownCurrency(String),

    /// Amounts in different currencies were combined.
    Mismatch(String, String),
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::UnknownCurrency(code) => write!(f, "Unknown currency: {}", code),
            CurrencyError::Mismatch(a, b) => write!(f, "Currency mismatch: {} vs {}", a, b),
        }
    }
}

impl std::error::Error for CurrencyError {}

/// Interpolation-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::NonMonotonicData { index: 2 };
/// assert!(format!("{}", err).contains("index 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Abscissae are not strictly increasing.
    #[error("Data is not strictly increasing at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = PricingError::InvalidArgument("Test error".to_string());
        assert_eq!(format!("{}", err), "Invalid argument: Test error");
    }

    #[test]
    fn test_unsupported_configuration_display() {
        let err = PricingError::UnsupportedConfiguration("no swaption surface".to_string());
        assert_eq!(
            format!("{}", err),
            "Unsupported configuration: no swaption surface"
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::InvalidDomain("t = -1".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_solver_max_iterations_maps_to_non_convergence() {
        let err: PricingError = SolverError::MaxIterationsExceeded { iterations: 42 }.into();
        assert_eq!(err, PricingError::NonConvergence { iterations: 42 });
    }

    #[test]
    fn test_solver_no_bracket_maps_to_invalid_argument() {
        let err: PricingError = SolverError::NoBracket { a: 0.0, b: 1.0 }.into();
        assert!(matches!(err, PricingError::InvalidArgument(_)));
    }

    #[test]
    fn test_date_error_display() {
        let err = DateError::InvalidDate {
            year: 2024,
            month: 2,
            day: 30,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");

        let err = DateError::ParseError("invalid format".to_string());
        assert_eq!(format!("{}", err), "Date parse error: invalid format");
    }

    #[test]
    fn test_currency_mismatch_display() {
        let err = CurrencyError::Mismatch("USD".to_string(), "EUR".to_string());
        assert_eq!(format!("{}", err), "Currency mismatch: USD vs EUR");
    }

    #[test]
    fn test_interpolation_error_display() {
        let err = InterpolationError::InsufficientData { got: 0, need: 1 };
        assert_eq!(
            format!("{}", err),
            "Insufficient data points: got 0, need at least 1"
        );
    }
}
