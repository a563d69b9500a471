//! Time, calendar, currency and error types.
//!
//! This module provides:
//! - `time`: [`Date`], [`DayCountConvention`], [`BusinessDayConvention`]
//! - `calendar`: business-day calendars, date adjustment and business-day arithmetic
//! - `tenor`: market tenors (`3M`, `5Y`, ...)
//! - `currency`: ISO 4217 codes and currency-tagged amounts
//! - `error`: structured error types shared by the pricing layers

pub mod calendar;
pub mod currency;
pub mod error;
pub mod tenor;
pub mod time;

pub use calendar::{add_business_days, Calendar, HolidayCalendar, WeekendCalendar};
pub use currency::{Currency, CurrencyAmount};
pub use error::{CurrencyError, DateError, InterpolationError, PricingError, SolverError};
pub use tenor::{Tenor, TenorUnit};
pub use time::{BusinessDayConvention, Date, DayCountConvention};
