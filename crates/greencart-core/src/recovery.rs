//! # Password Recovery
//!
//! Forgot password → OTP → new password → success.
//!
//! ## State Machine (per email)
//! ```text
//!                request(email)
//!   (none) ─────────────────────► Issued { code, issued_at, attempts }
//!                                   │  ▲
//!                  verify(code) ok  │  │ resend() after 60s
//!                                   ▼  │
//!                                 Verified
//!                                   │
//!                complete(new pwd)  │  new ≠ current
//!                                   ▼
//!                                 (none)   password hash replaced
//!
//!   Issued ── MAX_OTP_ATTEMPTS wrong codes ──► (none)
//! ```
//!
//! Unknown emails get a pending entry with no code. It runs the same cooldown
//! and attempt count as a real one, so nothing the caller sees depends on
//! whether the account exists. Codes are never returned to the caller;
//! delivery is simulated by [`PasswordResets::issued_code`].

use std::collections::HashMap;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{DateTime, Duration, Utc};

use crate::error::{CoreError, CoreResult};
use crate::session::UserDirectory;
use crate::{MAX_OTP_ATTEMPTS, OTP_LENGTH, OTP_RESEND_COOLDOWN_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingReset {
    /// `None` when no account exists for the email.
    code: Option<String>,
    issued_at: DateTime<Utc>,
    verified: bool,
    attempts: u32,
}

impl PendingReset {
    fn issue(now: DateTime<Utc>, has_account: bool) -> Self {
        PendingReset {
            code: has_account.then(generate_code),
            issued_at: now,
            verified: false,
            attempts: 0,
        }
    }

    fn resend_allowed_at(&self) -> DateTime<Utc> {
        self.issued_at + Duration::seconds(OTP_RESEND_COOLDOWN_SECS)
    }
}

fn generate_code() -> String {
    let modulus = 10u32.pow(OTP_LENGTH as u32);
    format!("{:0width$}", OsRng.next_u32() % modulus, width = OTP_LENGTH)
}

/// In-flight password resets keyed by email.
#[derive(Debug, Clone, Default)]
pub struct PasswordResets {
    pending: HashMap<String, PendingReset>,
}

impl PasswordResets {
    pub fn new() -> Self {
        PasswordResets {
            pending: HashMap::new(),
        }
    }

    /// Starts a reset for `email`.
    ///
    /// Returns whether a code is outstanding for a real account. Unknown
    /// emails return `false` but are tracked exactly like known ones. A
    /// repeat request inside the cooldown keeps the current code.
    pub fn request(&mut self, directory: &UserDirectory, email: &str, now: DateTime<Utc>) -> bool {
        let has_account = directory.find_by_email(email).is_some();

        match self.pending.get(email) {
            Some(pending) if now < pending.resend_allowed_at() => {}
            _ => {
                self.pending
                    .insert(email.to_string(), PendingReset::issue(now, has_account));
            }
        }
        self.issued_code(email).is_some()
    }

    /// Issues a fresh code once the cooldown has passed.
    ///
    /// ## Errors
    /// - `NoPendingReset` if `request` was never accepted for `email`
    /// - `ResendTooSoon` inside the cooldown, with the seconds left
    pub fn resend(&mut self, email: &str, now: DateTime<Utc>) -> CoreResult<()> {
        let pending = self
            .pending
            .get_mut(email)
            .ok_or_else(|| CoreError::NoPendingReset(email.to_string()))?;

        let allowed_at = pending.resend_allowed_at();
        if now < allowed_at {
            let millis = (allowed_at - now).num_milliseconds();
            return Err(CoreError::ResendTooSoon {
                retry_in_secs: (millis + 999) / 1000,
            });
        }

        *pending = PendingReset::issue(now, pending.code.is_some());
        Ok(())
    }

    /// Seconds until `resend` is allowed; zero when it already is or when no
    /// reset is pending.
    pub fn resend_available_in(&self, email: &str, now: DateTime<Utc>) -> i64 {
        self.pending
            .get(email)
            .map(|p| (p.resend_allowed_at() - now).num_seconds().max(0))
            .unwrap_or(0)
    }

    /// Checks the code the user typed.
    ///
    /// ## Errors
    /// - `InvalidCode` for a wrong code or no reset in progress
    /// - `TooManyAttempts` on the last allowed wrong guess; the reset is
    ///   dropped and must be requested again
    pub fn verify(&mut self, email: &str, code: &str) -> CoreResult<()> {
        let pending = self
            .pending
            .get_mut(email)
            .ok_or(CoreError::InvalidCode)?;

        if pending.code.as_deref() == Some(code) {
            pending.verified = true;
            return Ok(());
        }

        pending.attempts += 1;
        if pending.attempts >= MAX_OTP_ATTEMPTS {
            self.pending.remove(email);
            return Err(CoreError::TooManyAttempts {
                max: MAX_OTP_ATTEMPTS,
            });
        }
        Err(CoreError::InvalidCode)
    }

    pub fn is_verified(&self, email: &str) -> bool {
        self.pending.get(email).is_some_and(|p| p.verified)
    }

    /// Sets the new password and ends the reset.
    ///
    /// ## Errors
    /// - `NoPendingReset` without a verified code
    /// - `PasswordReused` if `new_password` is the current password; the
    ///   reset stays open so the user can pick another
    pub fn complete(
        &mut self,
        directory: &mut UserDirectory,
        email: &str,
        new_password: &str,
    ) -> CoreResult<()> {
        if !self.is_verified(email) {
            return Err(CoreError::NoPendingReset(email.to_string()));
        }
        if directory.password_matches(email, new_password) {
            return Err(CoreError::PasswordReused);
        }

        directory.set_password(email, new_password)?;
        self.pending.remove(email);
        Ok(())
    }

    /// The code delivered to `email`, if one is outstanding.
    ///
    /// Stands in for the email/SMS channel.
    pub fn issued_code(&self, email: &str) -> Option<&str> {
        self.pending.get(email).and_then(|p| p.code.as_deref())
    }

    /// Drops any reset in progress for `email`.
    pub fn cancel(&mut self, email: &str) {
        self.pending.remove(email);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CredentialHasher, HashParams};
    use chrono::TimeZone;

    const CUSTOMER: &str = "customer@example.com";

    fn directory() -> UserDirectory {
        let hasher = CredentialHasher::new(HashParams::MINIMAL).unwrap();
        UserDirectory::seeded(hasher).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_unknown_email_is_accepted_silently() {
        let dir = directory();
        let mut resets = PasswordResets::new();
        assert!(!resets.request(&dir, "ghost@example.com", t0()));
        assert!(resets.issued_code("ghost@example.com").is_none());
        assert!(matches!(
            resets.verify("ghost@example.com", "0000"),
            Err(CoreError::InvalidCode)
        ));
    }

    #[test]
    fn test_unknown_email_cannot_be_told_apart() {
        let dir = directory();
        let mut resets = PasswordResets::new();
        let ghost = "ghost@example.com";
        resets.request(&dir, CUSTOMER, t0());
        resets.request(&dir, ghost, t0());

        let later = t0() + Duration::seconds(20);
        assert_eq!(
            resets.resend_available_in(CUSTOMER, later),
            resets.resend_available_in(ghost, later)
        );
        assert!(matches!(
            resets.resend(ghost, later),
            Err(CoreError::ResendTooSoon { retry_in_secs: 40 })
        ));
        assert!(matches!(
            resets.resend(CUSTOMER, later),
            Err(CoreError::ResendTooSoon { retry_in_secs: 40 })
        ));

        let after = t0() + Duration::seconds(60);
        resets.resend(ghost, after).unwrap();
        resets.resend(CUSTOMER, after).unwrap();
        assert!(resets.issued_code(ghost).is_none());
        assert!(resets.issued_code(CUSTOMER).is_some());
    }

    #[test]
    fn test_full_recovery_flow() {
        let mut dir = directory();
        let mut resets = PasswordResets::new();

        assert!(resets.request(&dir, CUSTOMER, t0()));
        let code = resets.issued_code(CUSTOMER).unwrap().to_string();

        resets.verify(CUSTOMER, &code).unwrap();
        resets.complete(&mut dir, CUSTOMER, "Fresh456!").unwrap();

        assert!(dir.authenticate(CUSTOMER, "Fresh456!").is_ok());
        assert!(dir.authenticate(CUSTOMER, "Pass123!").is_err());
        assert!(resets.issued_code(CUSTOMER).is_none());
    }

    #[test]
    fn test_wrong_code() {
        let dir = directory();
        let mut resets = PasswordResets::new();
        resets.request(&dir, CUSTOMER, t0());

        let code = resets.issued_code(CUSTOMER).unwrap().to_string();
        let wrong = if code == "0000" { "1111" } else { "0000" };

        assert!(matches!(
            resets.verify(CUSTOMER, wrong),
            Err(CoreError::InvalidCode)
        ));
        assert!(!resets.is_verified(CUSTOMER));
        assert!(matches!(
            resets.verify("nobody@example.com", "1234"),
            Err(CoreError::InvalidCode)
        ));
    }

    #[test]
    fn test_too_many_wrong_codes_drop_the_reset() {
        let dir = directory();
        let mut resets = PasswordResets::new();
        resets.request(&dir, CUSTOMER, t0());

        let code = resets.issued_code(CUSTOMER).unwrap().to_string();
        let wrong = if code == "0000" { "1111" } else { "0000" };

        for _ in 1..MAX_OTP_ATTEMPTS {
            assert!(matches!(
                resets.verify(CUSTOMER, wrong),
                Err(CoreError::InvalidCode)
            ));
        }
        assert!(matches!(
            resets.verify(CUSTOMER, wrong),
            Err(CoreError::TooManyAttempts { .. })
        ));

        assert!(resets.issued_code(CUSTOMER).is_none());
        assert!(resets.verify(CUSTOMER, &code).is_err());
        assert!(!resets.is_verified(CUSTOMER));
    }

    #[test]
    fn test_resend_cooldown() {
        let dir = directory();
        let mut resets = PasswordResets::new();
        resets.request(&dir, CUSTOMER, t0());

        let err = resets
            .resend(CUSTOMER, t0() + Duration::seconds(45))
            .unwrap_err();
        assert!(matches!(err, CoreError::ResendTooSoon { retry_in_secs: 15 }));
        assert_eq!(
            resets.resend_available_in(CUSTOMER, t0() + Duration::seconds(45)),
            15
        );

        resets.resend(CUSTOMER, t0() + Duration::seconds(60)).unwrap();
        assert_eq!(
            resets.resend_available_in(CUSTOMER, t0() + Duration::seconds(60)),
            60
        );
    }

    #[test]
    fn test_resend_without_request() {
        let mut resets = PasswordResets::new();
        assert!(matches!(
            resets.resend(CUSTOMER, t0()),
            Err(CoreError::NoPendingReset(_))
        ));
    }

    #[test]
    fn test_repeat_request_inside_cooldown_keeps_code() {
        let dir = directory();
        let mut resets = PasswordResets::new();
        resets.request(&dir, CUSTOMER, t0());
        let first = resets.issued_code(CUSTOMER).unwrap().to_string();

        resets.request(&dir, CUSTOMER, t0() + Duration::seconds(5));
        assert_eq!(resets.issued_code(CUSTOMER), Some(first.as_str()));
    }

    #[test]
    fn test_complete_requires_verified_code() {
        let mut dir = directory();
        let mut resets = PasswordResets::new();
        resets.request(&dir, CUSTOMER, t0());

        let err = resets
            .complete(&mut dir, CUSTOMER, "Fresh456!")
            .unwrap_err();
        assert!(matches!(err, CoreError::NoPendingReset(_)));
        assert!(dir.authenticate(CUSTOMER, "Pass123!").is_ok());
    }

    #[test]
    fn test_complete_rejects_current_password() {
        let mut dir = directory();
        let mut resets = PasswordResets::new();
        resets.request(&dir, CUSTOMER, t0());
        let code = resets.issued_code(CUSTOMER).unwrap().to_string();
        resets.verify(CUSTOMER, &code).unwrap();

        let err = resets
            .complete(&mut dir, CUSTOMER, "Pass123!")
            .unwrap_err();
        assert!(matches!(err, CoreError::PasswordReused));
        assert!(resets.is_verified(CUSTOMER));
    }
}
