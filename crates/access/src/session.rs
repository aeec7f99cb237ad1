//! Authenticated-session model and rehydration from persisted storage.
//!
//! The session is created on login, rehydrated once from the persisted store
//! at startup, and destroyed on logout. It is passed explicitly into the
//! policy and predicate — there is deliberately no module-level auth state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use terragate_core::EmployeeId;

/// Named capability controlling route/sidebar visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntitlement {
    pub name: String,
}

impl MenuEntitlement {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An (action, route) pair granting a CRUD capability independent of menu
/// visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntitlement {
    pub permission_name: String,
    pub menu_url: String,
}

impl PermissionEntitlement {
    pub fn new(permission_name: impl Into<String>, menu_url: impl Into<String>) -> Self {
        Self {
            permission_name: permission_name.into(),
            menu_url: menu_url.into(),
        }
    }
}

/// Identity payload of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub employee_id: EmployeeId,
    pub display_name: String,
    pub email: String,
}

/// Snapshot of a session as persisted client-side, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: SessionUser,
    pub menu: Vec<MenuEntitlement>,
    pub permissions: Vec<PermissionEntitlement>,
    pub stored_at: DateTime<Utc>,
}

impl StoredSession {
    /// Decode the persisted JSON form.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// The principal's current authentication state and entitlements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub is_authenticated: bool,
    /// True until the persisted store has been consulted at startup. The
    /// route guard holds every decision while this is set.
    pub is_loading: bool,
    pub user: Option<SessionUser>,
    pub menu: Vec<MenuEntitlement>,
    pub permissions: Vec<PermissionEntitlement>,
}

impl AuthSession {
    /// Startup placeholder: nothing known yet.
    pub fn loading() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            user: None,
            menu: Vec::new(),
            permissions: Vec::new(),
        }
    }

    /// Logged-out state: settled, no entitlements.
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            is_loading: false,
            user: None,
            menu: Vec::new(),
            permissions: Vec::new(),
        }
    }

    /// Fresh login.
    pub fn authenticated(
        user: SessionUser,
        menu: Vec<MenuEntitlement>,
        permissions: Vec<PermissionEntitlement>,
    ) -> Self {
        Self {
            is_authenticated: true,
            is_loading: false,
            user: Some(user),
            menu,
            permissions,
        }
    }

    pub fn from_stored(stored: StoredSession) -> Self {
        Self::authenticated(stored.user, stored.menu, stored.permissions)
    }

    /// Whether the sidebar menu carries an entry for `route_name`.
    ///
    /// Menu names are display-cased ("Employees") while route names are
    /// lower-cased path segments, so the match ignores ASCII case.
    pub fn has_menu(&self, route_name: &str) -> bool {
        self.menu
            .iter()
            .any(|m| m.name.eq_ignore_ascii_case(route_name))
    }

    /// Whether a permission entitlement matches `permission` and, when given,
    /// the route name (`menu_url` is stored exactly as the route name).
    ///
    /// Membership only — the authenticated check belongs to the callers.
    pub fn grants(&self, permission: &str, route_name: Option<&str>) -> bool {
        self.permissions.iter().any(|e| {
            e.permission_name == permission
                && route_name.is_none_or(|route| e.menu_url == route)
        })
    }
}

/// Persisted client-side session storage, read once at startup.
pub trait SessionStore {
    fn get_stored(&self) -> Option<StoredSession>;
    fn is_authenticated(&self) -> bool;
    fn clear(&self);
}

/// Rebuild the session from the persisted store.
///
/// Stored data whose authentication flag has lapsed is a stale session:
/// cleared and replaced with the anonymous state so the user lands on the
/// login screen instead of crashing.
pub fn rehydrate(store: &dyn SessionStore) -> AuthSession {
    match store.get_stored() {
        Some(stored) if store.is_authenticated() => {
            tracing::debug!(
                employee = %stored.user.employee_id,
                menus = stored.menu.len(),
                "session rehydrated from storage"
            );
            AuthSession::from_stored(stored)
        }
        Some(_) => {
            tracing::warn!("stored session is no longer authenticated; clearing");
            store.clear();
            AuthSession::anonymous()
        }
        None => AuthSession::anonymous(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn sample_user() -> SessionUser {
        SessionUser {
            employee_id: EmployeeId::new(),
            display_name: "Ayu Lestari".to_string(),
            email: "ayu@example.com".to_string(),
        }
    }

    fn sample_stored() -> StoredSession {
        StoredSession {
            user: sample_user(),
            menu: vec![MenuEntitlement::new("Employees")],
            permissions: vec![PermissionEntitlement::new("read", "employees")],
            stored_at: Utc::now(),
        }
    }

    struct FakeStore {
        stored: Option<StoredSession>,
        authenticated: bool,
        cleared: Cell<bool>,
    }

    impl SessionStore for FakeStore {
        fn get_stored(&self) -> Option<StoredSession> {
            self.stored.clone()
        }

        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        fn clear(&self) {
            self.cleared.set(true);
        }
    }

    #[test]
    fn loading_session_is_unsettled_and_unauthenticated() {
        let session = AuthSession::loading();
        assert!(session.is_loading);
        assert!(!session.is_authenticated);
        assert!(session.user.is_none());
    }

    #[test]
    fn rehydrate_restores_an_authenticated_session() {
        let store = FakeStore {
            stored: Some(sample_stored()),
            authenticated: true,
            cleared: Cell::new(false),
        };

        let session = rehydrate(&store);
        assert!(session.is_authenticated);
        assert!(!session.is_loading);
        assert!(session.has_menu("employees"));
        assert!(!store.cleared.get());
    }

    #[test]
    fn stale_stored_session_is_cleared_not_crashed() {
        let store = FakeStore {
            stored: Some(sample_stored()),
            authenticated: false,
            cleared: Cell::new(false),
        };

        let session = rehydrate(&store);
        assert_eq!(session, AuthSession::anonymous());
        assert!(store.cleared.get());
    }

    #[test]
    fn empty_store_yields_the_anonymous_session() {
        let store = FakeStore {
            stored: None,
            authenticated: false,
            cleared: Cell::new(false),
        };

        assert_eq!(rehydrate(&store), AuthSession::anonymous());
        assert!(!store.cleared.get());
    }

    #[test]
    fn menu_match_ignores_ascii_case() {
        let session = AuthSession::from_stored(sample_stored());
        assert!(session.has_menu("employees"));
        assert!(session.has_menu("EMPLOYEES"));
        assert!(!session.has_menu("companies"));
    }

    #[test]
    fn grants_matches_permission_and_route() {
        let session = AuthSession::from_stored(sample_stored());
        assert!(session.grants("read", Some("employees")));
        assert!(session.grants("read", None));
        assert!(!session.grants("read", Some("companies")));
        assert!(!session.grants("delete", Some("employees")));
    }

    #[test]
    fn stored_session_round_trips_through_json() {
        let stored = sample_stored();
        let raw = serde_json::to_string(&stored).unwrap();
        assert_eq!(StoredSession::from_json(&raw).unwrap(), stored);
    }
}
