//! # Auth Commands
//!
//! Sign in, sign up, sign out and the forgot-password flow.
//!
//! ## Recovery Flow
//! ```text
//! ┌─────────────────┐  forgot_password  ┌──────────────┐  verify_code  ┌───────────────┐
//! │ Forgot Password │ ────────────────► │ OTP (4 digit)│ ────────────► │ New Password  │
//! └─────────────────┘                   └──────┬───────┘               └───────┬───────┘
//!                                              │ resend_code (60s)             │ reset_password
//!                                              ▼                               ▼
//!                                         new code                         Success
//! ```
//!
//! Every session change ends with the navigator settling, so the response
//! tells the screen where the user now is.

use chrono::Utc;
use greencart_core::routing::Route;
use greencart_core::validation::{
    password_checklist as checklist, ForgotPasswordForm, Form, NewPasswordForm, OtpForm,
    RequirementStatus, SignInForm, SignUpForm,
};
use greencart_core::Principal;
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use super::simulate_latency;
use crate::error::ApiError;
use crate::navigation::Transition;
use crate::state::{CartState, ConfigState, NavigationState, RecoveryState, SessionState};

/// Signed-in user plus where the guard put them.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub principal: Principal,
    pub navigation: Transition,
}

/// State of a password reset as the OTP screen needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryResponse {
    pub email: String,
    /// Seconds until "Resend code" becomes active.
    pub resend_in_secs: i64,
}

/// Signs in with email and password.
///
/// ## Errors
/// - `VALIDATION_ERROR` with field errors for a malformed form
/// - `INVALID_CREDENTIALS` for an unknown email or a wrong password
pub async fn sign_in(
    session: &SessionState,
    navigation: &NavigationState,
    config: &ConfigState,
    form: SignInForm,
) -> Result<AuthResponse, ApiError> {
    let request = form.validate()?;
    debug!(email = %request.email, remember_me = request.remember_me, "sign_in command");

    let principal = session
        .with_session_mut(|s| s.sign_in(&request.email, &request.password))
        .inspect_err(|_| warn!(email = %request.email, "Sign-in rejected"))?;

    info!(user_id = %principal.id, role = %principal.role, "Signed in");
    simulate_latency(config).await;

    let navigation = navigation.with_navigator_mut(|n| n.settle(Some(&principal)));
    Ok(AuthResponse {
        principal,
        navigation,
    })
}

/// Creates an account and signs it in.
///
/// ## Errors
/// - `VALIDATION_ERROR` with field errors (weak password, mismatch, ...)
/// - `DUPLICATE_EMAIL` if the email is registered
pub async fn sign_up(
    session: &SessionState,
    navigation: &NavigationState,
    config: &ConfigState,
    form: SignUpForm,
) -> Result<AuthResponse, ApiError> {
    let request = form.validate()?;
    debug!(email = %request.email, role = %request.role, "sign_up command");

    let principal = session.with_session_mut(|s| {
        s.sign_up(
            &request.email,
            &request.password,
            &request.full_name,
            request.role,
        )
    })?;

    info!(user_id = %principal.id, role = %principal.role, "Account created");
    simulate_latency(config).await;

    let navigation = navigation.with_navigator_mut(|n| n.settle(Some(&principal)));
    Ok(AuthResponse {
        principal,
        navigation,
    })
}

/// Signs out, empties the cart and returns to the auth screens.
pub fn sign_out(
    session: &SessionState,
    cart: &CartState,
    navigation: &NavigationState,
) -> Transition {
    let previous = session.with_session_mut(|s| s.sign_out());
    if let Some(p) = &previous {
        info!(user_id = %p.id, "Signed out");
    }
    cart.with_cart_mut(|c| c.clear());

    navigation.with_navigator_mut(|n| n.settle(None))
}

/// Gets the signed-in user, if any.
pub fn current_user(session: &SessionState) -> Option<Principal> {
    session.current()
}

/// Evaluates the password checklist shown while typing a new password.
pub fn password_checklist(password: &str) -> Vec<RequirementStatus> {
    checklist(password)
}

/// Starts a password reset.
///
/// Unknown emails get the same response as real ones; no code is issued
/// for them.
pub async fn forgot_password(
    session: &SessionState,
    recovery: &RecoveryState,
    config: &ConfigState,
    form: ForgotPasswordForm,
) -> Result<RecoveryResponse, ApiError> {
    let email = form.validate()?;
    let now = Utc::now();

    let (issued, code) = session.with_session(|s| {
        recovery.with_resets_mut(|r| {
            let issued = r.request(s.directory(), &email, now);
            (issued, r.issued_code(&email).map(str::to_string))
        })
    });

    if let (true, Some(code)) = (issued, code) {
        // Stand-in for the email delivery channel.
        debug!(email = %email, code = %code, "Recovery code issued");
    }
    simulate_latency(config).await;

    Ok(recovery_response(recovery, email, now))
}

/// Sends a fresh code once the cooldown has passed.
///
/// ## Errors
/// - `RATE_LIMITED` inside the 60 s cooldown
/// - `INVALID_CODE` if no reset was started for `email`
pub async fn resend_code(
    recovery: &RecoveryState,
    config: &ConfigState,
    email: &str,
) -> Result<RecoveryResponse, ApiError> {
    let now = Utc::now();
    let code = recovery.with_resets_mut(|r| {
        r.resend(email, now)?;
        Ok::<_, ApiError>(r.issued_code(email).map(str::to_string))
    })?;

    if let Some(code) = code {
        debug!(email = %email, code = %code, "Recovery code resent");
    }
    simulate_latency(config).await;

    Ok(recovery_response(recovery, email.to_string(), now))
}

/// Checks the code typed on the OTP screen.
///
/// ## Errors
/// - `INVALID_CODE` for a wrong code
/// - `TOO_MANY_ATTEMPTS` once too many wrong codes were typed; the user has
///   to request a new one
pub async fn verify_code(
    recovery: &RecoveryState,
    config: &ConfigState,
    email: &str,
    form: OtpForm,
) -> Result<RecoveryResponse, ApiError> {
    let code = form.validate()?;
    recovery
        .with_resets_mut(|r| r.verify(email, &code))
        .inspect_err(|_| warn!(email = %email, "Recovery code rejected"))?;

    info!(email = %email, "Recovery code verified");
    simulate_latency(config).await;

    Ok(recovery_response(recovery, email.to_string(), Utc::now()))
}

/// Sets the new password and shows the success screen.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a weak or mismatched password
/// - `INVALID_CODE` if the code was not verified first
/// - `PASSWORD_REUSED` if the new password is the current one
pub async fn reset_password(
    session: &SessionState,
    recovery: &RecoveryState,
    navigation: &NavigationState,
    config: &ConfigState,
    email: &str,
    form: NewPasswordForm,
) -> Result<Transition, ApiError> {
    let password = form.validate()?;

    let principal = session.with_session_mut(|s| {
        recovery.with_resets_mut(|r| r.complete(s.directory_mut(), email, &password))?;
        Ok::<_, ApiError>(s.current().cloned())
    })?;

    info!(email = %email, "Password reset");
    simulate_latency(config).await;

    Ok(navigation.with_navigator_mut(|n| n.navigate(Route::ResetSuccess, principal.as_ref())))
}

/// Abandons a reset, e.g. when the user backs out of the OTP screen.
pub fn cancel_recovery(recovery: &RecoveryState, email: &str) {
    debug!(email = %email, "cancel_recovery command");
    recovery.with_resets_mut(|r| r.cancel(email));
}

fn recovery_response(
    recovery: &RecoveryState,
    email: String,
    now: chrono::DateTime<Utc>,
) -> RecoveryResponse {
    let resend_in_secs = recovery.with_resets(|r| r.resend_available_in(&email, now));
    RecoveryResponse {
        email,
        resend_in_secs,
    }
}
