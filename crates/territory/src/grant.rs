//! Grant assembly: the validation boundary in front of the submission
//! collaborator.
//!
//! Validation failures are caught here and never reach the grant service;
//! collaborator failures propagate back to the caller untouched (the engine
//! never retries).

use serde::Serialize;
use thiserror::Error;

use terragate_core::EmployeeId;

use crate::selection::{SelectionEntry, SelectionSet};

/// Pre-submission validation failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GrantValidationError {
    #[error("no employee selected for the grant")]
    MissingEmployee,

    #[error("no territories selected for the grant")]
    EmptySelection,
}

/// Failure of the grant workflow as a whole.
#[derive(Debug, Error)]
pub enum GrantError {
    #[error(transparent)]
    Validation(#[from] GrantValidationError),

    /// The submission collaborator rejected the request (network, server
    /// validation). Propagated as-is.
    #[error("grant submission failed: {0}")]
    Service(anyhow::Error),
}

/// An access grant ready for the submission collaborator.
///
/// Carries only the entries the user directly checked: a grant at a parent
/// level already implies the whole subtree, so the implied entries stay
/// behind in the UI state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantRequest {
    pub employee_id: EmployeeId,
    pub entries: Vec<SelectionEntry>,
}

impl GrantRequest {
    /// Validate the form state and assemble the submission payload.
    pub fn assemble(
        employee_id: Option<EmployeeId>,
        selection: &SelectionSet,
    ) -> Result<Self, GrantValidationError> {
        let employee_id = employee_id.ok_or(GrantValidationError::MissingEmployee)?;

        let entries: Vec<SelectionEntry> = selection.explicit_entries().cloned().collect();
        if entries.is_empty() {
            return Err(GrantValidationError::EmptySelection);
        }

        Ok(Self {
            employee_id,
            entries,
        })
    }
}

/// Collaborator that persists an assembled grant.
pub trait GrantSubmissionService {
    fn submit(&self, request: &GrantRequest) -> anyhow::Result<()>;
}

/// Assemble and submit in one step.
pub fn submit_grant(
    service: &dyn GrantSubmissionService,
    employee_id: Option<EmployeeId>,
    selection: &SelectionSet,
) -> Result<(), GrantError> {
    let request = GrantRequest::assemble(employee_id, selection)?;
    tracing::info!(
        employee = %request.employee_id,
        territories = request.entries.len(),
        "submitting territory grant"
    );
    service.submit(&request).map_err(GrantError::Service)
}
