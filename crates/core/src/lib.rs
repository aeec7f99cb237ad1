//! `terragate-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers and the shared error taxonomy used by the
//! territory-selection and access-control crates.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{EmployeeId, TerritoryId};
