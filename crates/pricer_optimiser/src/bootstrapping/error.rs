//! Bootstrap-specific error types.
//!
//! Every failure names the pillar it happened at, so a broken quote can be
//! traced back to its maturity.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{DateError, PricingError, SolverError};
use thiserror::Error;

/// Errors that can occur while stripping a yield or hazard curve.
///
/// # Examples
///
/// ```
/// use pricer_optimiser::bootstrapping::BootstrapError;
///
/// let err = BootstrapError::convergence_failure(5.0, 100);
/// assert!(err.to_string().contains("5"));
/// assert!(err.is_convergence_failure());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// Root find hit its iteration cap at a pillar.
    #[error("Failed to converge at maturity {maturity} after {iterations} iterations")]
    ConvergenceFailure {
        /// Pillar time (years from the curve base date)
        maturity: f64,
        /// Iterations attempted
        iterations: usize,
    },

    /// Two quotes land on the same pillar after date adjustment.
    #[error("Duplicate maturity detected: {maturity}")]
    DuplicateMaturity {
        /// The duplicated pillar time
        maturity: f64,
    },

    /// Fewer quotes than pillars needed.
    #[error("Insufficient quotes: need at least {required}, got {provided}")]
    InsufficientData {
        /// Minimum number of quotes
        required: usize,
        /// Number of quotes provided
        provided: usize,
    },

    /// Solved rate is negative and the configuration forbids it.
    #[error("Negative rate detected at maturity {maturity}: rate = {rate}")]
    NegativeRate {
        /// Pillar time
        maturity: f64,
        /// Solved rate
        rate: f64,
    },

    /// Wrapped solver error from root-finding.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// Wrapped market data error.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Wrapped pricing error from the instrument repriced at a pillar.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Wrapped date arithmetic error.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// General invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BootstrapError {
    /// Create a convergence failure error.
    pub fn convergence_failure(maturity: f64, iterations: usize) -> Self {
        Self::ConvergenceFailure {
            maturity,
            iterations,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if this is a convergence failure.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::ConvergenceFailure { .. })
    }

    /// Re-labels an exhausted root find as a convergence failure at
    /// `maturity`; other errors pass through.
    pub(crate) fn at_pillar(self, maturity: f64) -> Self {
        match self {
            Self::Solver(SolverError::MaxIterationsExceeded { iterations })
            | Self::Pricing(PricingError::NonConvergence { iterations }) => {
                Self::convergence_failure(maturity, iterations)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Display Tests
    // ========================================

    #[test]
    fn test_convergence_failure_display() {
        let err = BootstrapError::convergence_failure(5.0, 100);
        let display = err.to_string();
        assert!(display.contains("5"));
        assert!(display.contains("100"));
    }

    #[test]
    fn test_duplicate_maturity_display() {
        let err = BootstrapError::DuplicateMaturity { maturity: 2.5 };
        assert!(err.to_string().contains("2.5"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = BootstrapError::invalid_input("no quotes");
        assert_eq!(err.to_string(), "Invalid input: no quotes");
    }

    // ========================================
    // Conversion Tests
    // ========================================

    #[test]
    fn test_from_market_data_error() {
        let err: BootstrapError = MarketDataError::InvalidDomain { t: -1.0 }.into();
        assert!(matches!(err, BootstrapError::MarketData(_)));
    }

    #[test]
    fn test_from_pricing_error() {
        let err: BootstrapError = PricingError::InvalidArgument("x".to_string()).into();
        assert!(matches!(err, BootstrapError::Pricing(_)));
    }

    #[test]
    fn test_at_pillar_relabels_iteration_cap() {
        let solver: BootstrapError = SolverError::MaxIterationsExceeded { iterations: 7 }.into();
        assert_eq!(
            solver.at_pillar(3.0),
            BootstrapError::convergence_failure(3.0, 7)
        );

        let pricing: BootstrapError = PricingError::NonConvergence { iterations: 9 }.into();
        assert!(pricing.at_pillar(1.0).is_convergence_failure());

        let other = BootstrapError::invalid_input("bad");
        assert_eq!(other.clone().at_pillar(1.0), other);
    }
}
