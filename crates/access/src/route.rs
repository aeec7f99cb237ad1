//! Static per-route authorization requirements.

use serde::{Deserialize, Serialize};

/// Authorization requirements attached to a route.
///
/// Built once per route table entry; the policy reads it, never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub path: String,
    /// Requires an authenticated session.
    pub is_protected: bool,
    /// Only reachable logged out (sign-in, password reset).
    pub is_unprotected: bool,
    /// Roles declared on the route; matched against the session's menu names.
    pub roles: Vec<String>,
    /// Permissions of which ANY one grants access (OR semantics).
    pub required_permissions: Vec<String>,
}

impl RouteSpec {
    pub fn protected(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_protected: true,
            is_unprotected: false,
            roles: Vec::new(),
            required_permissions: Vec::new(),
        }
    }

    pub fn unprotected(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_protected: false,
            is_unprotected: true,
            roles: Vec::new(),
            required_permissions: Vec::new(),
        }
    }

    /// Neither flag: reachable by anyone in any state.
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_protected: false,
            is_unprotected: false,
            roles: Vec::new(),
            required_permissions: Vec::new(),
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_required_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// Route name derived from the path: the last non-empty segment, with any
    /// query string stripped.
    pub fn route_name(&self) -> &str {
        route_name_from_path(&self.path)
    }
}

/// Derive the entitlement-lookup name from a path.
pub fn route_name_from_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
}
