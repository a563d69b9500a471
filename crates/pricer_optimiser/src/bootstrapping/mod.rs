//! Curve stripping for the ISDA standard model.
//!
//! ## Architecture
//!
//! The bootstrapping module provides:
//! - [`IsdaYieldCurveBootstrapper`]: discount curve from money-market and
//!   swap quotes ([`YieldCurveData`](pricer_core::market_data::YieldCurveData))
//! - [`HazardCurveBootstrapper`]: hazard curve from par CDS spreads
//!   ([`CdsQuote`])
//! - [`BootstrapConfig`]: solver tolerance, iteration cap and rate policy
//!
//! Both bootstrappers solve pillars sequentially with Brent, each pillar
//! holding the earlier ones fixed, and return an
//! [`IsdaCurve`](pricer_core::market_data::curves::IsdaCurve).

mod config;
mod error;
mod hazard_curve;
mod yield_curve;

pub use config::{BootstrapConfig, BootstrapConfigBuilder};
pub use error::BootstrapError;
pub use hazard_curve::{CdsQuote, HazardCurveBootstrapper};
pub use yield_curve::IsdaYieldCurveBootstrapper;
