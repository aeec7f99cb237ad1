//! Territory hierarchy and cascading selection.
//!
//! This crate contains the tree-selection half of the access-control engine,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage): the validated six-level territory hierarchy, the cascading
//! checked/disabled selection engine over it, and the grant-assembly boundary
//! that feeds the submission collaborator.

pub mod grant;
pub mod node;
pub mod selection;
pub mod source;

pub use grant::{GrantError, GrantRequest, GrantSubmissionService, GrantValidationError, submit_grant};
pub use node::{Territory, TerritoryKind, TerritoryNode, TerritoryTree};
pub use selection::{SelectionEngine, SelectionEntry, SelectionSet};
pub use source::{TerritoryDataSource, TerritoryFilter, TerritoryStatus};
