//! Collaborator seam for territory master data.

use serde::{Deserialize, Serialize};

use crate::node::TerritoryTree;

/// Lifecycle status of a territory in the master-data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerritoryStatus {
    Active,
    Inactive,
}

/// Filter applied when fetching the hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryFilter {
    pub status: Option<TerritoryStatus>,
}

impl TerritoryFilter {
    /// The usual grant-form fetch: only territories still active.
    pub fn active() -> Self {
        Self {
            status: Some(TerritoryStatus::Active),
        }
    }
}

/// Collaborator that produces the territory hierarchy.
///
/// Failures (network, malformed payloads) propagate to the caller; the
/// engine never retries.
pub trait TerritoryDataSource {
    fn fetch(&self, filter: &TerritoryFilter) -> anyhow::Result<TerritoryTree>;
}
