//! # Session State
//!
//! The session store and the password-recovery book, each behind its own
//! mutex.

use std::sync::{Arc, Mutex};

use greencart_core::recovery::PasswordResets;
use greencart_core::session::{CredentialHasher, HashParams, SessionStore, UserDirectory};
use greencart_core::{CoreResult, Principal};

use super::lock;

/// Holds the single session of the app.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<SessionStore>>,
}

impl SessionState {
    pub fn new(store: SessionStore) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(store)),
        }
    }

    /// Signed-out session over the seeded user directory.
    pub fn seeded(params: HashParams) -> CoreResult<Self> {
        let hasher = CredentialHasher::new(params)?;
        let directory = UserDirectory::seeded(hasher)?;
        Ok(SessionState::new(SessionStore::new(directory)))
    }

    /// Copy of the signed-in principal.
    pub fn current(&self) -> Option<Principal> {
        lock(&self.session).current().cloned()
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionStore) -> R,
    {
        let session = lock(&self.session);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionStore) -> R,
    {
        let mut session = lock(&self.session);
        f(&mut session)
    }
}

/// Password resets in progress.
#[derive(Debug, Clone, Default)]
pub struct RecoveryState {
    resets: Arc<Mutex<PasswordResets>>,
}

impl RecoveryState {
    pub fn new() -> Self {
        RecoveryState {
            resets: Arc::new(Mutex::new(PasswordResets::new())),
        }
    }

    pub fn with_resets<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PasswordResets) -> R,
    {
        let resets = lock(&self.resets);
        f(&resets)
    }

    pub fn with_resets_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PasswordResets) -> R,
    {
        let mut resets = lock(&self.resets);
        f(&mut resets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_shares_one_store() {
        let state = SessionState::seeded(HashParams::MINIMAL).unwrap();
        let clone = state.clone();

        clone
            .with_session_mut(|s| s.sign_in("vendor@example.com", "Pass123!"))
            .unwrap();

        assert_eq!(state.current().unwrap().full_name, "Rashida Musa");
    }
}
