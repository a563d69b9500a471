//! Credit derivative instruments.
//!
//! This module provides:
//! - [`IsdaCdsDefinition`]: single-name CDS terms under ISDA conventions
//! - [`IsdaCdsMethod`]: ISDA standard-model upfront, legs, par spread and
//!   flat-hazard calibration
//! - [`CdsDates`]: pricing, step-in and cash settlement dates
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::curves::IsdaCurve;
//! use pricer_core::types::{Date, HolidayCalendar, WeekendCalendar};
//! use pricer_models::instruments::credit::{CdsDates, IsdaCdsDefinition, IsdaCdsMethod};
//!
//! let maturity = Date::from_ymd(2018, 6, 20).unwrap();
//! let start = IsdaCdsDefinition::default_start_date(
//!     maturity,
//!     &HolidayCalendar::new("MondayToFriday", []),
//! )
//! .unwrap();
//! let cds = IsdaCdsDefinition::builder(start, maturity)
//!     .notional(1.0e9)
//!     .coupon(0.01)
//!     .recovery_rate(0.4)
//!     .build()
//!     .unwrap();
//!
//! let discount = IsdaCurve::flat("IR_CURVE", 0.01).unwrap();
//! let dates = CdsDates::standard(Date::from_ymd(2013, 6, 20).unwrap(), &WeekendCalendar);
//!
//! // quoted above the coupon: the buyer pays upfront
//! let upfront = IsdaCdsMethod::default()
//!     .upfront_charge_from_spread(&cds, &discount, 0.012, &dates, false)
//!     .unwrap();
//! assert!(upfront > 0.0);
//! ```

mod cds;
mod pricing;

pub use cds::{CdsCoupon, IsdaCdsDefinition, IsdaCdsDefinitionBuilder};
pub use pricing::{CdsDates, IsdaCdsMethod};
