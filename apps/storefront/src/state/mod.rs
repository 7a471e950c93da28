//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## One State Type per Concern
//! Commands take only the states they need, so their signatures document
//! what they touch.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                          AppState                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │        │            │            │             │             │         │
//! │        ▼            ▼            ▼             ▼             ▼         │
//! │  ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌───────────┐ ┌──────────┐   │
//! │  │ Session  │ │   Cart   │ │ Catalog   │ │ Profile   │ │ Config   │   │
//! │  │ State    │ │  State   │ │ Orders    │ │ State     │ │ State    │   │
//! │  │          │ │          │ │ Listings  │ │           │ │          │   │
//! │  │ session, │ │ Arc<     │ │           │ │ Arc<      │ │ read-    │   │
//! │  │ resets   │ │  Mutex>  │ │           │ │  Mutex>   │ │ only     │   │
//! │  └──────────┘ └──────────┘ └───────────┘ └───────────┘ └──────────┘   │
//! │                                                                         │
//! │  + NavigationState (current route, guarded)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Order
//! A command that needs two stores locks them in this order and never holds
//! a lock across an `.await`:
//! session → resets → profile → cart → orders → listings → navigation

mod cart;
mod catalog;
mod config;
mod profile;
mod session;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use cart::CartState;
pub use catalog::{CatalogState, ListingState, OrderState};
pub use config::ConfigState;
pub use profile::ProfileState;
pub use session::{RecoveryState, SessionState};

pub use crate::navigation::NavigationState;

use crate::error::ApiError;

/// Locks `mutex`, recovering the data if a previous holder panicked.
///
/// Every store is plain data that is valid after each completed mutation,
/// so a poisoned lock still guards a consistent value.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Every state object of one app instance.
#[derive(Debug)]
pub struct AppState {
    pub config: ConfigState,
    pub session: SessionState,
    pub recovery: RecoveryState,
    pub cart: CartState,
    pub catalog: CatalogState,
    pub orders: OrderState,
    pub listings: ListingState,
    pub profile: ProfileState,
    pub navigation: NavigationState,
}

impl AppState {
    /// Builds seeded state for `config`.
    ///
    /// Fails only if the configured hash parameters are rejected.
    pub fn new(config: ConfigState) -> Result<Self, ApiError> {
        let session = SessionState::seeded(config.hash_params())?;

        Ok(AppState {
            session,
            recovery: RecoveryState::new(),
            cart: CartState::new(),
            catalog: CatalogState::seeded(),
            orders: OrderState::seeded(),
            listings: ListingState::seeded(),
            profile: ProfileState::new(),
            navigation: NavigationState::new(),
            config,
        })
    }
}
