//! Route-level authorization decisions.
//!
//! Pure policy check in the same spirit as the selection engine's contract:
//! no IO, no panics, no hidden state. The route guard owns waiting for the
//! session to settle; `evaluate` assumes `is_loading` is already false.

use serde::Serialize;

use crate::route::RouteSpec;
use crate::session::AuthSession;

/// Login screen; denied-unauthenticated traffic lands here.
pub const LOGIN_PATH: &str = "/";
/// Landing page for already-authenticated visits to logged-out-only routes.
pub const HOME_PATH: &str = "/home";
/// Destination for authenticated sessions missing an entitlement.
pub const FORBIDDEN_PATH: &str = "/403";

/// Redirect target carried by a denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    /// The attempted path, retained for post-login return.
    pub return_to: Option<String>,
}

impl Redirect {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            to: path.into(),
            return_to: None,
        }
    }

    pub fn login(attempted: impl Into<String>) -> Self {
        Self {
            to: LOGIN_PATH.to_string(),
            return_to: Some(attempted.into()),
        }
    }
}

/// Outcome of evaluating a route against a session.
///
/// An authorization denial is this value, not an error; the guard consumes
/// it and the destination route renders whatever UX applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub allowed: bool,
    pub redirect: Option<Redirect>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            redirect: None,
        }
    }

    pub fn deny(redirect: Redirect) -> Self {
        Self {
            allowed: false,
            redirect: Some(redirect),
        }
    }
}

/// The route-gating decision procedure.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide whether `session` may view `route`.
    ///
    /// Total and deterministic over every (route, session) pair; never
    /// panics. Evaluate only once the session has settled.
    pub fn evaluate(route: &RouteSpec, session: &AuthSession) -> Decision {
        if route.is_protected && !session.is_authenticated {
            return Decision::deny(Redirect::login(route.path.clone()));
        }

        if route.is_unprotected && session.is_authenticated {
            return Decision::deny(Redirect::to(HOME_PATH));
        }

        if route.is_protected && session.is_authenticated {
            // Admin bypass keyed off the route's DECLARED roles, not the
            // session's: any authenticated session passes an ADMIN-tagged
            // route. Kept bug-for-bug until product signs off on a fix.
            if Self::declares_admin_role(route) {
                return Decision::allow();
            }

            // Requirement-free protected routes (home, profile) only need an
            // authenticated session; the menu gate applies once the route
            // declares roles or permissions.
            if route.roles.is_empty() && route.required_permissions.is_empty() {
                return Decision::allow();
            }

            let route_name = route.route_name();
            let has_menu_access = session.has_menu(route_name);
            let has_role_access = route.roles.is_empty()
                || route.roles.iter().any(|role| {
                    session
                        .menu
                        .iter()
                        .any(|m| m.name.eq_ignore_ascii_case(role))
                });
            let has_required_permissions = route.required_permissions.is_empty()
                || route
                    .required_permissions
                    .iter()
                    .any(|p| session.grants(p, Some(route_name)));

            return if has_menu_access && has_role_access && has_required_permissions {
                Decision::allow()
            } else {
                tracing::debug!(
                    route = %route.path,
                    has_menu_access,
                    has_role_access,
                    has_required_permissions,
                    "route denied"
                );
                Decision::deny(Redirect::to(FORBIDDEN_PATH))
            };
        }

        Decision::allow()
    }

    fn declares_admin_role(route: &RouteSpec) -> bool {
        !route.roles.is_empty()
            && route
                .roles
                .iter()
                .any(|role| role.eq_ignore_ascii_case("ADMIN"))
    }
}

#[cfg(test)]
mod tests {
    use terragate_core::EmployeeId;

    use super::*;
    use crate::session::{MenuEntitlement, PermissionEntitlement, SessionUser};

    fn authenticated_session(
        menu: &[&str],
        permissions: &[(&str, &str)],
    ) -> AuthSession {
        AuthSession::authenticated(
            SessionUser {
                employee_id: EmployeeId::new(),
                display_name: "Ayu Lestari".to_string(),
                email: "ayu@example.com".to_string(),
            },
            menu.iter().map(|m| MenuEntitlement::new(*m)).collect(),
            permissions
                .iter()
                .map(|(p, url)| PermissionEntitlement::new(*p, *url))
                .collect(),
        )
    }

    #[test]
    fn protected_route_without_session_redirects_to_login() {
        let route = RouteSpec::protected("/employees");
        let decision = AccessPolicy::evaluate(&route, &AuthSession::anonymous());

        assert!(!decision.allowed);
        let redirect = decision.redirect.unwrap();
        assert_eq!(redirect.to, LOGIN_PATH);
        assert_eq!(redirect.return_to.as_deref(), Some("/employees"));
    }

    #[test]
    fn unprotected_route_with_session_redirects_home() {
        let route = RouteSpec::unprotected("/");
        let session = authenticated_session(&[], &[]);
        let decision = AccessPolicy::evaluate(&route, &session);

        assert!(!decision.allowed);
        assert_eq!(decision.redirect.unwrap().to, HOME_PATH);
    }

    #[test]
    fn unprotected_route_without_session_is_allowed() {
        let route = RouteSpec::unprotected("/");
        let decision = AccessPolicy::evaluate(&route, &AuthSession::anonymous());
        assert_eq!(decision, Decision::allow());
    }

    #[test]
    fn requirement_free_protected_route_needs_only_authentication() {
        let route = RouteSpec::protected("/home");
        let session = authenticated_session(&[], &[]);
        assert_eq!(AccessPolicy::evaluate(&route, &session), Decision::allow());
    }

    #[test]
    fn declared_roles_bring_the_menu_gate_into_play() {
        let route = RouteSpec::protected("/employees").with_roles(["Employees"]);

        let with_menu = authenticated_session(&["Employees"], &[]);
        assert_eq!(AccessPolicy::evaluate(&route, &with_menu), Decision::allow());

        let without_menu = authenticated_session(&[], &[]);
        assert!(!AccessPolicy::evaluate(&route, &without_menu).allowed);
    }

    #[test]
    fn missing_menu_entry_denies_with_403() {
        let route = RouteSpec::protected("/employees").with_roles(["Employees"]);
        let session = authenticated_session(&["Companies"], &[]);
        let decision = AccessPolicy::evaluate(&route, &session);

        assert!(!decision.allowed);
        assert_eq!(decision.redirect.unwrap().to, FORBIDDEN_PATH);
    }

    #[test]
    fn role_match_is_case_insensitive_against_menu_names() {
        let route = RouteSpec::protected("/employees").with_roles(["EMPLOYEES"]);
        let session = authenticated_session(&["Employees"], &[]);
        assert_eq!(AccessPolicy::evaluate(&route, &session), Decision::allow());
    }

    #[test]
    fn any_one_required_permission_suffices() {
        let route = RouteSpec::protected("/employees")
            .with_required_permissions(["create", "update"]);
        let session = authenticated_session(&["Employees"], &[("update", "employees")]);
        assert_eq!(AccessPolicy::evaluate(&route, &session), Decision::allow());
    }

    #[test]
    fn zero_of_n_required_permissions_denies() {
        let route = RouteSpec::protected("/employees")
            .with_required_permissions(["create", "update"]);
        let session = authenticated_session(&["Employees"], &[("read", "employees")]);
        let decision = AccessPolicy::evaluate(&route, &session);

        assert!(!decision.allowed);
        assert_eq!(decision.redirect.unwrap().to, FORBIDDEN_PATH);
    }

    #[test]
    fn permission_must_be_scoped_to_the_route() {
        let route = RouteSpec::protected("/employees").with_required_permissions(["update"]);
        let session = authenticated_session(&["Employees"], &[("update", "companies")]);
        assert!(!AccessPolicy::evaluate(&route, &session).allowed);
    }

    #[test]
    fn admin_route_allows_any_authenticated_session() {
        // The bypass looks at the route's declared roles only: a session with
        // no matching menu, role, or permission still passes.
        let route = RouteSpec::protected("/admin/settings")
            .with_roles(["Admin"])
            .with_required_permissions(["update"]);
        let session = authenticated_session(&["Companies"], &[]);

        assert_eq!(AccessPolicy::evaluate(&route, &session), Decision::allow());
    }

    #[test]
    fn admin_bypass_still_requires_authentication() {
        let route = RouteSpec::protected("/admin/settings").with_roles(["ADMIN"]);
        let decision = AccessPolicy::evaluate(&route, &AuthSession::anonymous());

        assert!(!decision.allowed);
        assert_eq!(decision.redirect.unwrap().to, LOGIN_PATH);
    }

    #[test]
    fn unflagged_route_is_always_allowed() {
        let route = RouteSpec::public("/about");
        assert_eq!(
            AccessPolicy::evaluate(&route, &AuthSession::anonymous()),
            Decision::allow()
        );
        let session = authenticated_session(&[], &[]);
        assert_eq!(AccessPolicy::evaluate(&route, &session), Decision::allow());
    }

    #[test]
    fn evaluate_is_total_over_flag_and_entitlement_combinations() {
        // Every combination produces a decision without panicking, and
        // denials always carry a redirect.
        let sessions = [
            AuthSession::loading(),
            AuthSession::anonymous(),
            authenticated_session(&[], &[]),
            authenticated_session(&["Employees"], &[("read", "employees")]),
        ];
        let routes = [
            RouteSpec::public("/about"),
            RouteSpec::unprotected("/"),
            RouteSpec::protected("/employees"),
            RouteSpec::protected("/employees").with_roles(["Employees"]),
            RouteSpec::protected("/admin").with_roles(["Admin"]),
            RouteSpec::protected("/employees").with_required_permissions(["read"]),
        ];

        for route in &routes {
            for session in &sessions {
                let decision = AccessPolicy::evaluate(route, session);
                if !decision.allowed {
                    assert!(decision.redirect.is_some());
                }
            }
        }
    }
}
