//! Per-activation session check.
//!
//! Every time a view is entered a fresh `SessionGuard` is created for it and
//! checked once. Until the check resolves to `Ready` the view must render
//! nothing of its own content.

use tracing::debug;

use crate::models::Credential;
use crate::route::{Access, Route};

use super::TokenStore;

/// Resolution state of one view activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unchecked,
    /// The view may not render; go to the given route instead
    Redirecting(Route),
    Ready,
}

#[derive(Debug, Clone)]
pub struct SessionGuard {
    route: Route,
    state: GuardState,
    credential: Option<Credential>,
}

impl SessionGuard {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            state: GuardState::Unchecked,
            credential: None,
        }
    }

    /// Resolve the guard against the store. Only the first call reads the
    /// store; later calls return the settled state.
    ///
    /// Public-only views are shown to signed-in visitors as well. Only
    /// protected views redirect, and always to the login view.
    pub fn check(&mut self, store: &dyn TokenStore) -> GuardState {
        if self.state != GuardState::Unchecked {
            return self.state;
        }

        self.credential = store.read();
        self.state = match (self.route.access(), self.credential.is_some()) {
            (Access::Protected, false) => GuardState::Redirecting(Route::Login),
            _ => GuardState::Ready,
        };
        debug!(route = ?self.route, state = ?self.state, "Session check resolved");
        self.state
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == GuardState::Ready
    }

    /// The credential seen when the guard resolved
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
