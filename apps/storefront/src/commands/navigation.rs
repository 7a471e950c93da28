//! # Navigation Commands
//!
//! Screen changes requested by the frontend. The route guard runs after
//! each one, so asking for `/(vendor)/products` as a customer lands on
//! `/(tabs)` instead.

use greencart_core::routing::Route;
use tracing::debug;

use crate::error::ApiError;
use crate::navigation::Transition;
use crate::state::{NavigationState, SessionState};

/// Opens the screen at `path`, e.g. `/(tabs)/browse/3`.
///
/// ## Errors
/// - `NOT_FOUND` if `path` names no screen
pub fn navigate(
    session: &SessionState,
    navigation: &NavigationState,
    path: &str,
) -> Result<Transition, ApiError> {
    debug!(path = %path, "navigate command");

    let route = Route::parse(path).ok_or_else(|| ApiError::not_found("Route", path))?;
    let principal = session.current();
    Ok(navigation.with_navigator_mut(|n| n.navigate(route, principal.as_ref())))
}

/// Goes back one screen, guarded like any other transition.
pub fn go_back(session: &SessionState, navigation: &NavigationState) -> Transition {
    debug!("go_back command");

    let principal = session.current();
    navigation.with_navigator_mut(|n| n.back(principal.as_ref()))
}

/// Evaluates the guard for the current screen; called once at app start.
pub fn current_route(session: &SessionState, navigation: &NavigationState) -> Transition {
    let principal = session.current();
    navigation.with_navigator_mut(|n| n.settle(principal.as_ref()))
}
