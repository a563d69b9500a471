//! # Pricer Models (L2: Business Logic)
//!
//! Instruments, schedules and closed-form pricing methods.
//!
//! This crate provides:
//! - The Black (1976) kernel with analytic Greeks and price adjoint
//! - Payment schedules rolled on business-day calendars
//! - Cash- and physically-settled swaptions priced with Black
//! - Single-name CDS priced with the ISDA standard model
//!
//! ## Design Principles
//!
//! - **Stateless methods**: pricing types hold no market state; every call
//!   is a pure function of (instrument, market data)
//! - **Enums at the seams**: settlement and curve kinds are matched, not
//!   dispatched through trait objects
//! - **Builder pattern** for contract terms with market-standard defaults

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod schedules;
