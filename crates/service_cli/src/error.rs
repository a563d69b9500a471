//! CLI error types.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{DateError, PricingError};
use pricer_optimiser::bootstrapping::BootstrapError;
use thiserror::Error;

/// Errors raised by the `pricer` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date error: {0}")]
    Date(#[from] DateError),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error(
        "Grid {grid} line {line}: actual = {actual}, expected = {expected}, \
         absolute error = {absolute_error}, relative error = {relative_error}"
    )]
    GridFailure {
        grid: String,
        line: usize,
        actual: f64,
        expected: f64,
        absolute_error: f64,
        relative_error: f64,
    },
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
