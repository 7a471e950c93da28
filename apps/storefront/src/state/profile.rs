//! # Profile State
//!
//! Per-user settings, keyed by principal id.

use std::sync::{Arc, Mutex};

use greencart_core::profile::Profiles;

use super::lock;

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    profiles: Arc<Mutex<Profiles>>,
}

impl ProfileState {
    pub fn new() -> Self {
        ProfileState {
            profiles: Arc::new(Mutex::new(Profiles::new())),
        }
    }

    pub fn with_profiles<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Profiles) -> R,
    {
        let profiles = lock(&self.profiles);
        f(&profiles)
    }

    pub fn with_profiles_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Profiles) -> R,
    {
        let mut profiles = lock(&self.profiles);
        f(&mut profiles)
    }
}
