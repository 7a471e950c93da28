//! # GreenCart Storefront Library
//!
//! Application layer of the GreenCart storefront: state objects, the
//! commands the frontend calls, and the navigator that applies the route
//! guard. Business rules live in `greencart-core`.
//!
//! ## Module Organization
//! ```text
//! greencart_storefront/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState, lock order
//! │   ├── session.rs  ◄─── Session + password reset state
//! │   ├── cart.rs     ◄─── Cart state
//! │   ├── catalog.rs  ◄─── Catalog, orders, vendor listings
//! │   ├── profile.rs  ◄─── Per-user settings
//! │   └── config.rs   ◄─── Configuration state
//! ├── navigation.rs   ◄─── Current route, back stack, guard
//! ├── commands/       ◄─── auth, cart, catalog, checkout, orders, ...
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Multiple State Types
//! Each command takes only the states it needs, so a command's signature
//! shows everything it can touch. [`state::AppState`] just bundles one of
//! each for an app instance.

pub mod commands;
pub mod error;
pub mod navigation;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{AppState, ConfigState};

/// Builds an app instance from the environment.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO (greencart crates at DEBUG), RUST_LOG overrides     │
/// │                                                                         │
/// │  2. Load Configuration                                                  │
/// │     • GREENCART_* environment variables over defaults                   │
/// │                                                                         │
/// │  3. Initialize State Objects                                            │
/// │     • Seeded accounts, catalog, orders, listings                        │
/// │     • Empty cart, signed out                                            │
/// │                                                                         │
/// │  4. First Guard Evaluation                                              │
/// │     • `/` → `/(auth)/welcome`                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn start() -> Result<AppState, ApiError> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(store = %config.store_name, latency_ms = config.latency_ms, "Starting GreenCart storefront");

    let app = AppState::new(config)?;
    let entry = commands::navigation::current_route(&app.session, &app.navigation);
    info!(path = %entry.path, "State initialized");

    Ok(app)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=greencart=trace` - Show trace for greencart crates only
/// - Default: INFO, DEBUG for greencart crates
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,greencart=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_lands_on_welcome() {
        let app = start().unwrap();
        assert_eq!(app.navigation.current_path(), "/(auth)/welcome");
        assert!(app.session.current().is_none());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
