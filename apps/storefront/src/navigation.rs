//! # Navigator
//!
//! Tracks the current screen and applies the route guard after every
//! transition: navigation, sign-in, sign-up and sign-out.
//!
//! ## Transition
//! ```text
//!   navigate(to)
//!      │
//!      ▼
//!   current = to
//!      │
//!      ▼
//!   next_route(principal, to.group())
//!      │
//!      ├── None          → stay on `to`
//!      └── Some(target)  → replace with target.entry(), history cleared
//! ```

use std::sync::{Arc, Mutex};

use greencart_core::routing::{next_route, Route, RouteGroup, RouteTarget};
use greencart_core::Principal;
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::state::lock;

/// Deepest back stack kept; older entries are dropped first.
pub const MAX_HISTORY: usize = 50;

/// Where a transition ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Path of the screen now shown.
    pub path: String,
    pub group: RouteGroup,
    /// Set when the guard replaced the requested screen.
    #[ts(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_to: Option<RouteTarget>,
}

/// Current route plus the back stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new()
    }
}

impl Navigator {
    /// Starts at `/`, before the first guard evaluation.
    pub fn new() -> Self {
        Navigator {
            current: Route::Index,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Pushes `to` and applies the guard.
    ///
    /// Navigating to the screen already shown leaves the back stack alone.
    pub fn navigate(&mut self, to: Route, principal: Option<&Principal>) -> Transition {
        debug!(from = %self.current, to = %to, "navigate");
        if to != self.current {
            let previous = std::mem::replace(&mut self.current, to);
            if self.history.len() == MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(previous);
        }
        self.settle(principal)
    }

    /// Pops the back stack and applies the guard. Stays put on an empty stack.
    pub fn back(&mut self, principal: Option<&Principal>) -> Transition {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
        }
        self.settle(principal)
    }

    /// Re-evaluates the guard for the current route.
    ///
    /// Called after every session change so a sign-in moves the user out of
    /// the auth screens and a sign-out moves them back in.
    pub fn settle(&mut self, principal: Option<&Principal>) -> Transition {
        let redirected_to = next_route(principal, self.current.group());

        if let Some(target) = redirected_to {
            let entry = target.entry();
            info!(from = %self.current, to = %entry, ?target, "Route guard redirect");
            self.current = entry;
            self.history.clear();
        }

        Transition {
            path: self.current.path(),
            group: self.current.group(),
            redirected_to,
        }
    }
}

/// Managed navigator.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    navigator: Arc<Mutex<Navigator>>,
}

impl NavigationState {
    pub fn new() -> Self {
        NavigationState {
            navigator: Arc::new(Mutex::new(Navigator::new())),
        }
    }

    pub fn current_path(&self) -> String {
        lock(&self.navigator).current().path()
    }

    pub fn with_navigator_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Navigator) -> R,
    {
        let mut navigator = lock(&self.navigator);
        f(&mut navigator)
    }
}
