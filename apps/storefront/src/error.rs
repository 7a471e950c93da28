//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in GreenCart                              │
//! │                                                                         │
//! │  Screen                      Storefront                                 │
//! │  ──────                      ──────────                                 │
//! │                                                                         │
//! │  signIn(form)                                                          │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function → Result<T, ApiError>                          │  │
//! │  │      │                                                           │  │
//! │  │      ▼                                                           │  │
//! │  │  Form invalid? ──── FieldErrors ─────────────────┐               │  │
//! │  │      │                                           ▼               │  │
//! │  │      ▼                                                           │  │
//! │  │  Rule broken? ───── CoreError::InvalidCredentials ── ApiError ──►│  │
//! │  │      │                                                           │  │
//! │  │      ▼                                                           │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INVALID_CREDENTIALS"                                    │
//! │    // e.fieldErrors = { email: "..." }  (forms only)                    │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use greencart_core::{CoreError, FieldErrors};
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Form is invalid: email: email is required",
///   "fieldErrors": { "email": "email is required" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages when a form failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub field_errors: Option<FieldErrors>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Wrong email or password
    InvalidCredentials,

    /// Email already registered
    DuplicateEmail,

    /// No user is signed in
    Unauthenticated,

    /// Signed in, but the wrong role for this command
    Forbidden,

    /// Cart limits exceeded
    CartError,

    /// Checkout with nothing in the cart
    EmptyCart,

    /// Recovery code mismatch or no reset in progress
    InvalidCode,

    /// Recovery code resent too soon
    RateLimited,

    /// Too many wrong recovery codes; the reset must start over
    TooManyAttempts,

    /// New password equals the old one
    PasswordReused,

    /// Unexpected failure
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "Not signed in")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: format!("Form is invalid: {}", errors),
            field_errors: Some(errors),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidCredentials => ApiError::new(ErrorCode::InvalidCredentials, message),
            CoreError::DuplicateEmail(_) => ApiError::new(ErrorCode::DuplicateEmail, message),
            CoreError::NotSignedIn => ApiError::new(ErrorCode::Unauthenticated, message),
            CoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, message),
            CoreError::CartTooLarge { .. } => ApiError::new(ErrorCode::CartError, message),
            CoreError::QuantityTooLarge { .. } => ApiError::new(ErrorCode::ValidationError, message),
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, message),
            CoreError::InvalidCode | CoreError::NoPendingReset(_) => {
                ApiError::new(ErrorCode::InvalidCode, message)
            }
            CoreError::ResendTooSoon { .. } => ApiError::new(ErrorCode::RateLimited, message),
            CoreError::TooManyAttempts { .. } => ApiError::new(ErrorCode::TooManyAttempts, message),
            CoreError::PasswordReused => ApiError::new(ErrorCode::PasswordReused, message),
            CoreError::PasswordHash(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal("Could not process password")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Form(errors) => ApiError::from(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greencart_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let cases = [
            (CoreError::InvalidCredentials, ErrorCode::InvalidCredentials),
            (
                CoreError::DuplicateEmail("a@x.com".to_string()),
                ErrorCode::DuplicateEmail,
            ),
            (CoreError::NotSignedIn, ErrorCode::Unauthenticated),
            (CoreError::not_found("Product", "9"), ErrorCode::NotFound),
            (CoreError::EmptyCart, ErrorCode::EmptyCart),
            (
                CoreError::ResendTooSoon { retry_in_secs: 30 },
                ErrorCode::RateLimited,
            ),
            (
                CoreError::TooManyAttempts { max: 5 },
                ErrorCode::TooManyAttempts,
            ),
            (CoreError::PasswordReused, ErrorCode::PasswordReused),
            (
                CoreError::PasswordHash("bad params".to_string()),
                ErrorCode::Internal,
            ),
        ];

        for (core, code) in cases {
            assert_eq!(ApiError::from(core).code, code);
        }
    }

    #[test]
    fn test_validation_keeps_message() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "quantity".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity is required");
        assert!(err.field_errors.is_none());
    }

    #[test]
    fn test_form_errors_are_serialized_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "email is required");

        let json = serde_json::to_value(ApiError::from(CoreError::Form(errors))).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["fieldErrors"]["email"], "email is required");
    }

    #[test]
    fn test_field_errors_omitted_when_absent() {
        let json = serde_json::to_value(ApiError::not_found("Listing", "4")).unwrap();
        assert_eq!(json["message"], "Listing not found: 4");
        assert!(json.get("fieldErrors").is_none());
    }
}
