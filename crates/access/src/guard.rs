//! Navigation-gating state machine driving [`AccessPolicy`].
//!
//! The guard renders nothing until a decision lands: `Pending` while the
//! session loads, `Redirecting` once a denial fires navigation, `Allowed`
//! when the route may render its children. A denied route never renders its
//! own forbidden UI; that belongs to the destination route.

use crate::policy::{AccessPolicy, Decision};
use crate::route::RouteSpec;
use crate::session::AuthSession;

/// Where the guard stands for the current attempted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Session still loading or no decision computed yet; render nothing.
    Pending,
    /// The decision carried a redirect; navigation has fired exactly once.
    /// Terminal for this path.
    Redirecting { to: String },
    /// The route may render its children.
    Allowed,
}

/// Fire-and-forget navigation request handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// The originally attempted path, for post-login return.
    pub return_to: Option<String>,
}

/// Navigation sink collaborator.
pub trait Navigator {
    fn navigate(&self, request: &NavigationRequest);
}

/// Stateful consumer of [`AccessPolicy`] across navigation events.
///
/// Single-threaded: fed by the render loop, never polled. Staleness is
/// resolved by comparing paths rather than flags, so a slow session load
/// racing a fast navigation can never apply a decision to the wrong path.
pub struct RouteGuard<'n> {
    navigator: &'n dyn Navigator,
    attempted: Option<String>,
    state: GuardState,
}

impl<'n> RouteGuard<'n> {
    pub fn new(navigator: &'n dyn Navigator) -> Self {
        Self {
            navigator,
            attempted: None,
            state: GuardState::Pending,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// The latest attempted path, if any navigation has happened.
    pub fn attempted_path(&self) -> Option<&str> {
        self.attempted.as_deref()
    }

    /// Record a new attempted path. Any in-flight decision for the previous
    /// path becomes stale and will be discarded on arrival.
    pub fn navigate_to(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(path = %path, "attempted path changed");
        self.attempted = Some(path);
        self.state = GuardState::Pending;
    }

    /// Feed the current session state for `route`.
    ///
    /// No-ops while the session is loading, when `route` no longer matches
    /// the latest attempted path, or once this path is already redirecting
    /// (the navigation side effect fires at most once per transition).
    pub fn evaluate(&mut self, route: &RouteSpec, session: &AuthSession) {
        let Some(attempted) = self.attempted.as_deref() else {
            return;
        };
        if route.path != attempted {
            tracing::debug!(
                decided_for = %route.path,
                attempted = %attempted,
                "stale decision discarded"
            );
            return;
        }
        if session.is_loading {
            self.state = GuardState::Pending;
            return;
        }
        if matches!(self.state, GuardState::Redirecting { .. }) {
            return;
        }

        let Decision { allowed, redirect } = AccessPolicy::evaluate(route, session);
        match redirect {
            Some(redirect) => {
                self.navigator.navigate(&NavigationRequest {
                    path: redirect.to.clone(),
                    replace: true,
                    return_to: redirect.return_to,
                });
                tracing::debug!(from = %route.path, to = %redirect.to, "redirect fired");
                self.state = GuardState::Redirecting { to: redirect.to };
            }
            None if allowed => self.state = GuardState::Allowed,
            // A denial always carries a redirect; render nothing otherwise.
            None => self.state = GuardState::Pending,
        }
    }
}
