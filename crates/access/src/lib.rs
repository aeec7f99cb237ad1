//! `terragate-access` — route-level authorization and CRUD gating.
//!
//! The decision core that gates every protected view: a pure access policy
//! evaluated against the session's entitlements, the navigation-driving
//! route guard consuming its decisions, and the fine-grained CRUD predicate
//! behind UI affordances. No IO and no hidden state; the session is passed
//! in explicitly everywhere.

pub mod guard;
pub mod permission;
pub mod policy;
pub mod route;
pub mod session;

pub use guard::{GuardState, NavigationRequest, Navigator, RouteGuard};
pub use permission::{CrudAction, PermissionPredicate};
pub use policy::{AccessPolicy, Decision, FORBIDDEN_PATH, HOME_PATH, LOGIN_PATH, Redirect};
pub use route::RouteSpec;
pub use session::{
    AuthSession, MenuEntitlement, PermissionEntitlement, SessionStore, SessionUser, StoredSession,
    rehydrate,
};
