//! Schedule generation error types.

use pricer_core::types::{Date, DateError, PricingError};
use thiserror::Error;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date must be before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Date arithmetic left the supported range.
    #[error("Date arithmetic overflow: {0}")]
    DateOverflow(#[from] DateError),
}

impl From<ScheduleError> for PricingError {
    fn from(err: ScheduleError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}
