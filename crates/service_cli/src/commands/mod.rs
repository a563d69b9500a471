//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod cds;
pub mod curve;
pub mod grid;
pub mod swaption;
