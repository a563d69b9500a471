//! Root-finding for curve calibration.
//!
//! - [`BrentSolver`]: bracketing root finder used by every bootstrap and
//!   by the flat-hazard calibration of the CDS method
//! - [`expand_bracket_upward`]: grows a one-sided bracket until it contains a root
//! - [`SolverConfig`]: tolerance and iteration cap
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;

pub use brent::{expand_bracket_upward, BrentSolver};
pub use config::SolverConfig;
