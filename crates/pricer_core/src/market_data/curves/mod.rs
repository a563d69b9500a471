//! Discount and hazard curves.
//!
//! - [`YieldCurve`]: discount factor / zero rate / forward rate contract
//! - [`CreditCurve`]: hazard rate / survival probability contract
//! - [`FlatCurve`]: constant rate
//! - [`InterpolatedCurve`]: node-based curve with [`ZeroInterpolation`] and [`Extrapolation`] rules
//! - [`IsdaCurve`]: ISDA standard-model flat-forward curve, used for discounting and hazard
//! - [`CurveEnum`]: static dispatch over the above

mod credit;
mod curve_enum;
mod flat;
mod interpolated;
mod isda;
mod traits;

pub use credit::CreditCurve;
pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use interpolated::{Extrapolation, InterpolatedCurve, ZeroInterpolation};
pub use isda::IsdaCurve;
pub use traits::YieldCurve;
