//! Analytical pricing formulas.
//!
//! This module provides:
//! - Black (1976) pricing on a forward with analytic Greeks and adjoint
//! - Standard normal CDF/PDF built on Cody's erfc
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: `f64` for production, `f32` where it suffices
//! - **Value policies over errors**: expired options and zero volatility
//!   price to zero or intrinsic instead of failing

pub mod black;
pub mod distributions;

pub use black::{BlackFormula, BlackFunctionData, BlackPriceAdjoint, EuropeanOption};
pub use distributions::{erfc, norm_cdf, norm_pdf};
