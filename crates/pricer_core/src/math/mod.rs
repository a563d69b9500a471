//! Numerical building blocks.
//!
//! - [`interpolators`]: linear, bilinear and monotone-convex interpolation
//! - [`solvers`]: bracketing root finder ([`solvers::BrentSolver`])
//!
//! Everything here is generic over `num_traits::Float` so the same code
//! serves `f64` pricing and `f32` experiments.

pub mod interpolators;
pub mod solvers;
