//! # Session Store
//!
//! Who is signed in, and the directory of accounts they can sign in as.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │                 sign_in (ok) / sign_up (ok)                             │
//! │   ┌──────────┐ ───────────────────────────► ┌──────────────────────┐   │
//! │   │   None   │                              │  Some(Principal)     │   │
//! │   │          │ ◄─────────────────────────── │  (password-free)     │   │
//! │   └──────────┘          sign_out            └──────────────────────┘   │
//! │        │                                           │                    │
//! │        └── sign_in (err): unchanged                └── sign_in again:   │
//! │                                                       replaced whole    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Credentials are Argon2 PHC strings held only by [`UserDirectory`]. Every
//! value leaving this module is a [`Principal`], which has no password field.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{Principal, UserRole};

// =============================================================================
// Credential Hashing
// =============================================================================

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
}

impl HashParams {
    /// Cheapest parameters Argon2 accepts. Only for tests and demos.
    pub const MINIMAL: HashParams = HashParams {
        memory_kib: Params::MIN_M_COST,
        iterations: Params::MIN_T_COST,
    };
}

impl Default for HashParams {
    /// The argon2 crate's recommended defaults (19 MiB, 2 passes).
    fn default() -> Self {
        HashParams {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
        }
    }
}

/// Hashes and verifies passwords with Argon2id.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Builds a hasher; fails if the parameters are outside Argon2's limits.
    pub fn new(params: HashParams) -> CoreResult<Self> {
        let params = Params::new(params.memory_kib, params.iterations, 1, None)
            .map_err(|e| CoreError::PasswordHash(e.to_string()))?;

        Ok(CredentialHasher {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> CoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CoreError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Whether `password` matches the stored PHC string.
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher").finish_non_exhaustive()
    }
}

// =============================================================================
// User Directory
// =============================================================================

/// A principal plus its password hash. Never leaves the directory.
#[derive(Debug, Clone)]
struct Account {
    principal: Principal,
    password_hash: String,
}

/// Data for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub role: UserRole,
}

/// In-memory account list. Emails are unique and matched exactly.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    accounts: Vec<Account>,
    hasher: CredentialHasher,
}

impl UserDirectory {
    /// An empty directory.
    pub fn new(hasher: CredentialHasher) -> Self {
        UserDirectory {
            accounts: Vec::new(),
            hasher,
        }
    }

    /// The directory with the two demo accounts:
    ///
    /// | id | email | password | role |
    /// |----|-------|----------|------|
    /// | 1 | customer@example.com | Pass123! | customer |
    /// | 2 | vendor@example.com | Pass123! | vendor |
    pub fn seeded(hasher: CredentialHasher) -> CoreResult<Self> {
        let mut directory = UserDirectory::new(hasher);
        directory.insert(
            "1",
            NewAccount {
                email: "customer@example.com",
                password: "Pass123!",
                full_name: "Mark Jonathan",
                role: UserRole::Customer,
            },
        )?;
        directory.insert(
            "2",
            NewAccount {
                email: "vendor@example.com",
                password: "Pass123!",
                full_name: "Rashida Musa",
                role: UserRole::Vendor,
            },
        )?;
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.principal.email == email)
    }

    /// Looks up a principal by exact email.
    pub fn find_by_email(&self, email: &str) -> Option<&Principal> {
        self.account(email).map(|a| &a.principal)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Principal> {
        self.accounts
            .iter()
            .map(|a| &a.principal)
            .find(|p| p.id == id)
    }

    /// Checks credentials and returns the matching principal.
    pub fn authenticate(&self, email: &str, password: &str) -> CoreResult<Principal> {
        let account = self.account(email).ok_or(CoreError::InvalidCredentials)?;

        if !self.hasher.verify(password, &account.password_hash) {
            return Err(CoreError::InvalidCredentials);
        }

        Ok(account.principal.clone())
    }

    /// Creates an account with a fresh UUID.
    pub fn create(&mut self, account: NewAccount<'_>) -> CoreResult<Principal> {
        let id = Uuid::new_v4().to_string();
        self.insert(&id, account)
    }

    fn insert(&mut self, id: &str, account: NewAccount<'_>) -> CoreResult<Principal> {
        if self.account(account.email).is_some() {
            return Err(CoreError::DuplicateEmail(account.email.to_string()));
        }

        let principal = Principal {
            id: id.to_string(),
            email: account.email.to_string(),
            full_name: account.full_name.to_string(),
            role: account.role,
        };
        let password_hash = self.hasher.hash(account.password)?;

        self.accounts.push(Account {
            principal: principal.clone(),
            password_hash,
        });
        Ok(principal)
    }

    /// Whether `password` is the current password for `email`.
    pub fn password_matches(&self, email: &str, password: &str) -> bool {
        self.account(email)
            .is_some_and(|a| self.hasher.verify(password, &a.password_hash))
    }

    /// Replaces the password for `email`.
    pub fn set_password(&mut self, email: &str, password: &str) -> CoreResult<()> {
        let password_hash = self.hasher.hash(password)?;
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.principal.email == email)
            .ok_or_else(|| CoreError::not_found("User", email))?;
        account.password_hash = password_hash;
        Ok(())
    }

    /// Changes name and email of the account `id`.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown id
    /// - `DuplicateEmail` if another account already uses `email`
    pub fn update_identity(
        &mut self,
        id: &str,
        full_name: &str,
        email: &str,
    ) -> CoreResult<Principal> {
        if self
            .accounts
            .iter()
            .any(|a| a.principal.email == email && a.principal.id != id)
        {
            return Err(CoreError::DuplicateEmail(email.to_string()));
        }

        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.principal.id == id)
            .ok_or_else(|| CoreError::not_found("User", id))?;
        account.principal.full_name = full_name.to_string();
        account.principal.email = email.to_string();
        Ok(account.principal.clone())
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// The single session of an app instance.
#[derive(Debug, Clone)]
pub struct SessionStore {
    directory: UserDirectory,
    principal: Option<Principal>,
}

impl SessionStore {
    /// A signed-out session over `directory`.
    pub fn new(directory: UserDirectory) -> Self {
        SessionStore {
            directory,
            principal: None,
        }
    }

    /// The signed-in principal, if any.
    pub fn current(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut UserDirectory {
        &mut self.directory
    }

    /// Signs in by exact email match.
    ///
    /// ## Errors
    /// `InvalidCredentials` for an unknown email or a wrong password. The
    /// current session is left as it was.
    pub fn sign_in(&mut self, email: &str, password: &str) -> CoreResult<Principal> {
        let principal = self.directory.authenticate(email, password)?;
        self.principal = Some(principal.clone());
        Ok(principal)
    }

    /// Registers a new account and signs it in.
    ///
    /// ## Errors
    /// `DuplicateEmail` if the email is taken. The current session is left
    /// as it was.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
    ) -> CoreResult<Principal> {
        let principal = self.directory.create(NewAccount {
            email,
            password,
            full_name,
            role,
        })?;
        self.principal = Some(principal.clone());
        Ok(principal)
    }

    /// Clears the session and returns who was signed in. Idempotent.
    pub fn sign_out(&mut self) -> Option<Principal> {
        self.principal.take()
    }

    /// Updates the signed-in user's name and email in the directory and
    /// in the session.
    pub fn update_identity(&mut self, full_name: &str, email: &str) -> CoreResult<Principal> {
        let id = self
            .principal
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or(CoreError::NotSignedIn)?;

        let updated = self.directory.update_identity(&id, full_name, email)?;
        self.principal = Some(updated.clone());
        Ok(updated)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
