//! Market data: curves, swaption volatility surfaces, the market bundle and
//! sensitivity containers.
//!
//! # Components
//!
//! - [`curves`]: discount and hazard curves ([`InterpolatedCurve`], [`IsdaCurve`], ...)
//! - [`surfaces`]: swaption volatility by expiry and tenor
//! - [`bundle`]: the read-only [`MarketBundle`] handed to pricers
//! - [`yield_curve_data`]: cash and swap quotes for ISDA curve calibration
//! - [`sensitivity`]: [`CurveSensitivity`] and [`VolatilitySensitivity`]
//! - [`error`]: [`MarketDataError`]
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{
//!     Extrapolation, InterpolatedCurve, YieldCurve, ZeroInterpolation,
//! };
//!
//! let curve = InterpolatedCurve::new(
//!     &[1.0, 2.0, 5.0],
//!     &[0.01, 0.015, 0.02],
//!     ZeroInterpolation::MonotoneConvex,
//!     Extrapolation::Flat,
//! )
//! .unwrap();
//! assert!(curve.discount_factor(3.0).unwrap() < curve.discount_factor(2.0).unwrap());
//! ```

pub mod bundle;
pub mod curves;
pub mod error;
pub mod sensitivity;
pub mod surfaces;
pub mod yield_curve_data;

pub use bundle::{MarketBundle, MarketBundleBuilder};
pub use curves::{
    CreditCurve, CurveEnum, Extrapolation, FlatCurve, InterpolatedCurve, IsdaCurve, YieldCurve,
    ZeroInterpolation,
};
pub use error::MarketDataError;
pub use sensitivity::{CurveSensitivity, CurveSensitivityBuilder, SurfacePoint, VolatilitySensitivity};
pub use surfaces::{
    FlatSwaptionVolatility, InterpolatedSwaptionVolatility, SwaptionVolatility,
    SwaptionVolatilitySurface,
};
pub use yield_curve_data::{periodic_to_continuous, YieldCurveData, YieldCurveDataBuilder};
