//! Interest rate instruments.
//!
//! This module provides:
//! - [`FixedCouponSwap`]: fixed-for-floating swap on a time axis, with par
//!   rate, physical and cash annuities and their curve sensitivities
//! - [`Swaption`]: European swaption, cash- or physically-settled
//! - [`SwaptionBlackMethod`]: Black pricing, curve and volatility
//!   sensitivities, and Greeks
//!
//! # Architecture
//!
//! The settlement convention is a [`SwaptionSettlement`] enum and the
//! pricer matches on it, so both variants share one method type.
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::curves::FlatCurve;
//! use pricer_core::market_data::surfaces::FlatSwaptionVolatility;
//! use pricer_core::market_data::MarketBundle;
//! use pricer_core::types::Currency;
//! use pricer_models::instruments::rates::{
//!     FixedCouponSwap, Position, Swaption, SwaptionBlackMethod, SwaptionSettlement, SwaptionType,
//! };
//! use pricer_models::schedules::Frequency;
//!
//! let bundle = MarketBundle::builder()
//!     .curve("EUR-DSC", FlatCurve::new(0.02_f64))
//!     .curve("EUR-6M", FlatCurve::new(0.025_f64))
//!     .discount_curve(Currency::EUR, "EUR-DSC")
//!     .swaption_volatility(FlatSwaptionVolatility::new(0.3_f64))
//!     .build()
//!     .unwrap();
//!
//! // 5y into 10y cash-settled receiver
//! let swap = FixedCouponSwap::regular(
//!     Currency::EUR, 1.0e8, 5.0, 10, Frequency::Annual, 2, "EUR-DSC", "EUR-6M",
//! )
//! .unwrap();
//! let swaption = Swaption::new(
//!     swap,
//!     5.0,
//!     0.025,
//!     SwaptionType::Receiver,
//!     Position::Long,
//!     SwaptionSettlement::Cash { settlement_time: 5.0 },
//! )
//! .unwrap();
//!
//! let pv = SwaptionBlackMethod.present_value(&swaption, &bundle).unwrap();
//! assert!(pv.amount() > 0.0);
//! ```

mod pricing;
mod swap;
mod swaption;

pub use pricing::SwaptionBlackMethod;
pub use swap::{FixedCoupon, FixedCouponSwap, FloatingCoupon};
pub use swaption::{Position, Swaption, SwaptionSettlement, SwaptionType};
