//! # pricer_core: foundation of the interest-rate and credit pricing crates
//!
//! ## Role
//!
//! pricer_core is the bottom layer of the workspace. It provides:
//! - Dates, tenors, day counts, business-day conventions and calendars (`types`)
//! - Currencies and currency amounts (`types::currency`)
//! - Error types: `PricingError`, `DateError`, `SolverError`, ... (`types::error`)
//! - Interpolation and root finding (`math`)
//! - Yield and hazard curves, swaption volatility surfaces, the market
//!   bundle and sensitivity containers (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other pricer_* crates and only a small
//! set of external ones:
//! - num-traits: generic numerical code
//! - chrono: calendar arithmetic
//! - thiserror: error derivation
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
//! use pricer_core::types::{Currency, Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let tau = DayCountConvention::Actual360.year_fraction(start, end);
//! assert!((tau - 182.0 / 360.0).abs() < 1e-15);
//!
//! assert_eq!(Currency::USD.code(), "USD");
//!
//! let curve = FlatCurve::new(0.03_f64);
//! let df = curve.discount_factor(tau).unwrap();
//! assert!((df - (-0.03 * tau).exp()).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for dates, conventions, tenors,
//!   currencies, curves and quote sets

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
