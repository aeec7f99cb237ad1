//! CRUD-level permission gate behind UI affordances.
//!
//! Denial here never surfaces an error; callers hide or disable the control.

use serde::{Deserialize, Serialize};

use crate::session::AuthSession;

/// CRUD action gated by a permission entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudAction {
    Create,
    Read,
    Update,
    Delete,
}

impl CrudAction {
    /// Wire name matched against `permission_name` entitlements.
    pub const fn as_str(self) -> &'static str {
        match self {
            CrudAction::Create => "create",
            CrudAction::Read => "read",
            CrudAction::Update => "update",
            CrudAction::Delete => "delete",
        }
    }
}

impl core::fmt::Display for CrudAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained CRUD boolean over the session's permission entitlements.
///
/// Shares the entitlement lookup with the access policy; the only addition
/// is the authentication gate, so an unauthenticated session always answers
/// `false`. O(|permissions|) per call, never panics.
#[derive(Clone, Copy)]
pub struct PermissionPredicate<'s> {
    session: &'s AuthSession,
}

impl<'s> PermissionPredicate<'s> {
    pub fn new(session: &'s AuthSession) -> Self {
        Self { session }
    }

    /// Whether `action` is granted, optionally scoped to `route_name`.
    pub fn has(&self, action: CrudAction, route_name: Option<&str>) -> bool {
        self.session.is_authenticated && self.session.grants(action.as_str(), route_name)
    }

    pub fn can_create(&self, route_name: &str) -> bool {
        self.has(CrudAction::Create, Some(route_name))
    }

    pub fn can_read(&self, route_name: &str) -> bool {
        self.has(CrudAction::Read, Some(route_name))
    }

    pub fn can_update(&self, route_name: &str) -> bool {
        self.has(CrudAction::Update, Some(route_name))
    }

    pub fn can_delete(&self, route_name: &str) -> bool {
        self.has(CrudAction::Delete, Some(route_name))
    }
}
