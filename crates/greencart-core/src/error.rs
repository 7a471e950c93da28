//! # Error Types
//!
//! Domain-specific error types for greencart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  greencart-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule failures                         │
//! │  ├── ValidationError  - A single field failed a check                  │
//! │  └── FieldErrors      - Field-keyed map produced by form validation    │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → CoreError → ApiError → Screen   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is fatal. Every variant is shown inline on the screen that
//! triggered it and the user simply tries again.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown email or wrong password. Both cases share one message.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Sign-up or profile edit with an email that is already registered.
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// The operation needs a signed-in user.
    #[error("Not signed in")]
    NotSignedIn,

    /// An entity referenced by id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity would exceed the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Recovery code did not match the one issued.
    #[error("Invalid verification code")]
    InvalidCode,

    /// Recovery code was requested again inside the cooldown window.
    #[error("Code can be resent in {retry_in_secs}s")]
    ResendTooSoon { retry_in_secs: i64 },

    /// Too many wrong recovery codes; the reset was dropped.
    #[error("Too many incorrect codes ({max}); request a new one")]
    TooManyAttempts { max: u32 },

    /// Recovery step attempted without a prior (verified) request.
    #[error("No password reset in progress for {0}")]
    NoPendingReset(String),

    /// New password equals the current one.
    #[error("New password must be different from the current password")]
    PasswordReused,

    /// The hashing backend rejected its input or parameters.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Single-field validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Form validation failed on one or more fields.
    #[error("Form is invalid: {0}")]
    Form(FieldErrors),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &str, id: &str) -> Self {
        CoreError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::Form(errors)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Two fields that must agree do not.
    #[error("{field} does not match")]
    Mismatch { field: String },
}

impl ValidationError {
    /// Name of the field this error is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::Mismatch { field } => field,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field-keyed error map produced by form validation.
///
/// Keys are the camelCase field names the frontend binds inputs to, so the
/// screen can put each message under the right input. Only the first error
/// per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Records `message` for `field` unless the field already has an error.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Records the outcome of a field check under `field`.
    pub fn check(&mut self, field: &str, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.insert(field, e.to_string());
        }
    }

    /// Returns the message for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Turns the map into a result: `Ok(value)` when empty, `Err(self)` otherwise.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            CoreError::not_found("Listing", "42").to_string(),
            "Listing not found: 42"
        );
        assert_eq!(
            CoreError::ResendTooSoon { retry_in_secs: 12 }.to_string(),
            "Code can be resent in 12s"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::Required {
            field: "email".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        errors.insert("email", "Email is invalid");
        errors.check("password", Ok(()));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), None);
    }

    #[test]
    fn test_field_errors_finish() {
        assert_eq!(FieldErrors::new().finish(7), Ok(7));

        let mut errors = FieldErrors::new();
        errors.insert("otp", "otp is required");
        let result: Result<(), _> = errors.clone().finish(());
        assert_eq!(result, Err(errors));
    }

    #[test]
    fn test_field_errors_serialize_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.insert("fullName", "fullName is required");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"fullName":"fullName is required"}"#);
    }
}
