//! Schedule generation for interest rate and credit instruments.
//!
//! This module provides:
//! - [`Schedule`]: a collection of accrual periods
//! - [`Period`]: a single accrual period with start, end and payment dates
//! - [`Frequency`]: payment frequency (Annual, SemiAnnual, Quarterly, Monthly)
//! - [`ScheduleBuilder`]: builder with calendar, business-day convention and
//!   forward or backward generation
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2024, 1, 15).unwrap())
//!     .end(Date::from_ymd(2026, 1, 15).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .day_count(DayCountConvention::Thirty360)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.periods().len(), 4);
//! assert!((schedule.total_year_fraction() - 2.0).abs() < 1e-15);
//! ```

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder};
