//! # pricer_optimiser
//!
//! Curve calibration for Neutryx.
//!
//! This crate sits on top of Models (L2), solving the inverse problems that
//! turn market quotes into curves the pricing methods can read.
//!
//! ## Architecture Position
//!
//! Depends on `pricer_core` (L1) for curves and solvers and on
//! `pricer_models` (L2) for the CDS method used to reprice credit quotes.
//!
//! ## Modules
//!
//! - `bootstrapping`: ISDA discount curve stripping from money-market and
//!   swap rates, and hazard curve stripping from par CDS spreads
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::YieldCurveData;
//! use pricer_core::types::{Currency, Date, Tenor};
//! use pricer_optimiser::prelude::*;
//!
//! let data = YieldCurveData::builder(Currency::EUR, Date::from_ymd(2014, 1, 6).unwrap())
//!     .cash(Tenor::months(6), 0.003)
//!     .swap(Tenor::years(5), 0.012)
//!     .build()
//!     .unwrap();
//! let curve = IsdaYieldCurveBootstrapper::new(BootstrapConfig::default())
//!     .bootstrap("EUR", &data)
//!     .unwrap();
//! assert_eq!(curve.rates().len(), 2);
//! ```

#![warn(missing_docs)]

pub mod bootstrapping;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrapping::*;
}
