//! # Commands Module
//!
//! The functions the frontend calls. Each takes the state objects it needs
//! plus typed request values, and returns a serializable response or an
//! [`ApiError`].
//!
//! ## Command Groups
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ auth         │ sign in/up/out, password checklist, recovery flow        │
//! │ navigation   │ navigate, back (route guard applied)                     │
//! │ catalog      │ categories, products by category, search, product detail │
//! │ cart         │ get, add, set quantity, +/-, remove, clear               │
//! │ checkout     │ pay for the cart, receipt                                │
//! │ orders       │ customer orders by status, vendor incoming orders        │
//! │ vendor       │ listing add/edit/delete                                  │
//! │ profile      │ edit profile, language, dark mode, addresses, payments   │
//! │ config       │ read-only app configuration                              │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod navigation;
pub mod orders;
pub mod profile;
pub mod vendor;

use greencart_core::Principal;

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// Sleeps for the configured cosmetic delay. Callers must not hold a lock.
pub(crate) async fn simulate_latency(config: &ConfigState) {
    let delay = config.latency();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// The signed-in principal, or `Unauthenticated`.
pub(crate) fn require_principal(session: &SessionState) -> Result<Principal, ApiError> {
    session.current().ok_or_else(ApiError::unauthenticated)
}

/// The signed-in vendor, or `Unauthenticated` / `Forbidden`.
pub(crate) fn require_vendor(session: &SessionState) -> Result<Principal, ApiError> {
    let principal = require_principal(session)?;
    if !principal.is_vendor() {
        return Err(ApiError::forbidden("Vendor account required"));
    }
    Ok(principal)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::state::{AppState, ConfigState};

    /// Fresh app state with cheap hashing and no delays.
    pub fn app() -> AppState {
        AppState::new(ConfigState::for_tests()).unwrap()
    }

    pub fn signed_in(email: &str) -> AppState {
        let app = app();
        app.session
            .with_session_mut(|s| s.sign_in(email, "Pass123!"))
            .unwrap();
        app
    }

    pub fn customer() -> AppState {
        signed_in("customer@example.com")
    }

    pub fn vendor() -> AppState {
        signed_in("vendor@example.com")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support;
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_require_vendor() {
        let guest = test_support::app();
        assert_eq!(
            require_vendor(&guest.session).unwrap_err().code,
            ErrorCode::Unauthenticated
        );

        let customer = test_support::customer();
        assert_eq!(
            require_vendor(&customer.session).unwrap_err().code,
            ErrorCode::Forbidden
        );

        let vendor = test_support::vendor();
        assert_eq!(
            require_vendor(&vendor.session).unwrap().email,
            "vendor@example.com"
        );
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let mut config = ConfigState::for_tests();
        config.latency_ms = 20;

        let started = std::time::Instant::now();
        simulate_latency(&config).await;
        assert!(started.elapsed() >= std::time::Duration::from_millis(20));
    }
}
