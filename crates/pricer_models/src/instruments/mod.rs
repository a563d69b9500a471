//! Financial instrument definitions and their pricing methods.
//!
//! # Asset Class Modules
//!
//! Instruments are organised by asset class (enabled via feature flags):
//! - [`rates`]: swaps and European swaptions under Black
//! - [`credit`]: single-name CDS under the ISDA standard model
//!
//! # Architecture
//!
//! Instruments are plain value types, immutable once built. Pricing
//! methods are stateless structs whose operations are pure functions of
//! (instrument, market data); conventions that change the arithmetic,
//! such as swaption settlement, are enums matched inside the method.

#[cfg(feature = "rates")]
pub mod rates;

#[cfg(feature = "credit")]
pub mod credit;
