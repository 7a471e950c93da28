//! # Validation Module
//!
//! Field validators and the typed auth forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen                                                        │
//! │  ├── Password checklist (password_checklist) while typing              │
//! │  └── Inline field errors from the FieldErrors map                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form::validate (THIS MODULE)                                 │
//! │  ├── Raw strings in, typed record out                                  │
//! │  └── Every failing field reported at once                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores (session, cart, ...)                                  │
//! │  └── Business rules: duplicate email, quantity caps                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use greencart_core::validation::{Form, SignUpForm};
//! use greencart_core::UserRole;
//!
//! let form = SignUpForm {
//!     full_name: "Ann".into(),
//!     email: "ann@example.com".into(),
//!     password: "Garden#2024".into(),
//!     confirm_password: "Garden#2024".into(),
//!     role: UserRole::Customer,
//! };
//! let sign_up = form.validate().unwrap();
//! assert_eq!(sign_up.email, "ann@example.com");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{FieldErrors, ValidationError};
use crate::types::UserRole;
use crate::{MAX_LINE_QUANTITY, OTP_LENGTH};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of an email address (RFC 5321).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Minimum password length for new passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Form Trait
// =============================================================================

/// A raw form as the screen collected it.
///
/// `validate` checks every field and either returns the typed record the
/// stores accept or a map of every failing field.
pub trait Form {
    /// The validated record.
    type Output;

    fn validate(&self) -> Result<Self::Output, FieldErrors>;
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Not empty, at most 254 characters, no whitespace
/// - Exactly one `@` with a non-empty local part
/// - Domain is non-empty and contains a dot that is not at either end
///
/// ```rust
/// use greencart_core::validation::validate_email;
///
/// assert!(validate_email("vendor@example.com").is_ok());
/// assert!(validate_email("vendor@example").is_err());
/// assert!(validate_email("@example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must be a valid email address".to_string(),
    };

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
        });
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.find('.') {
        Some(pos) if pos > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a person's full name (2 to 100 characters after trimming).
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "fullName".to_string(),
        });
    }
    if name.chars().count() < 2 {
        return Err(ValidationError::TooShort {
            field: "fullName".to_string(),
            min: 2,
        });
    }
    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "fullName".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a catalog search query and returns it trimmed.
///
/// Empty is allowed (shows everything); longer than 100 characters is not.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a phone number: digits with common separators, 7 to 15 digits.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')');
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if !phone.chars().all(allowed) || !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be a phone number".to_string(),
        });
    }

    Ok(())
}

/// Validates a one-time code: exactly [`OTP_LENGTH`] ASCII digits.
pub fn validate_otp(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "otp".to_string(),
        });
    }
    if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "otp".to_string(),
            reason: format!("must be {} digits", OTP_LENGTH),
        });
    }

    Ok(())
}

// =============================================================================
// Password Requirements
// =============================================================================

/// One rule from the password checklist.
#[derive(Debug, Clone, Copy)]
pub struct PasswordRequirement {
    pub id: &'static str,
    pub label: &'static str,
    check: fn(&str) -> bool,
}

impl PasswordRequirement {
    pub fn is_met(&self, password: &str) -> bool {
        (self.check)(password)
    }
}

fn has_min_length(p: &str) -> bool {
    p.chars().count() >= MIN_PASSWORD_LENGTH
}

fn has_uppercase(p: &str) -> bool {
    p.chars().any(char::is_uppercase)
}

fn has_lowercase(p: &str) -> bool {
    p.chars().any(char::is_lowercase)
}

fn has_digit(p: &str) -> bool {
    p.chars().any(|c| c.is_ascii_digit())
}

fn has_special(p: &str) -> bool {
    p.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// The rules a new password must satisfy, in checklist order.
pub const PASSWORD_REQUIREMENTS: [PasswordRequirement; 5] = [
    PasswordRequirement {
        id: "length",
        label: "At least 8 characters",
        check: has_min_length,
    },
    PasswordRequirement {
        id: "uppercase",
        label: "An uppercase letter",
        check: has_uppercase,
    },
    PasswordRequirement {
        id: "lowercase",
        label: "A lowercase letter",
        check: has_lowercase,
    },
    PasswordRequirement {
        id: "number",
        label: "A number",
        check: has_digit,
    },
    PasswordRequirement {
        id: "special",
        label: "A special character",
        check: has_special,
    },
];

/// Checklist row rendered under the password input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RequirementStatus {
    pub id: String,
    pub label: String,
    pub is_met: bool,
}

/// Evaluates every password requirement against `password`.
pub fn password_checklist(password: &str) -> Vec<RequirementStatus> {
    PASSWORD_REQUIREMENTS
        .iter()
        .map(|r| RequirementStatus {
            id: r.id.to_string(),
            label: r.label.to_string(),
            is_met: r.is_met(password),
        })
        .collect()
}

/// Validates a new password against [`PASSWORD_REQUIREMENTS`].
///
/// Reports the first unmet requirement.
pub fn validate_new_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    match PASSWORD_REQUIREMENTS.iter().find(|r| !r.is_met(password)) {
        None => Ok(()),
        Some(r) if r.id == "length" => Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        }),
        Some(r) => Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: format!("must contain {}", r.label.to_lowercase()),
        }),
    }
}

fn validate_confirmation(password: &str, confirmation: &str) -> ValidationResult<()> {
    if confirmation.is_empty() {
        return Err(ValidationError::Required {
            field: "confirmPassword".to_string(),
        });
    }
    if password != confirmation {
        return Err(ValidationError::Mismatch {
            field: "confirmPassword".to_string(),
        });
    }
    Ok(())
}

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity: 1 to [`MAX_LINE_QUANTITY`].
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Sign-in screen values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Validated sign-in request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl Form for SignInForm {
    type Output = SignIn;

    /// Existing passwords are only checked for presence; strength rules
    /// apply to new passwords.
    fn validate(&self) -> Result<SignIn, FieldErrors> {
        let email = self.email.trim();
        let mut errors = FieldErrors::new();
        errors.check("email", validate_email(email));
        errors.check("password", required("password", &self.password));

        errors.finish(SignIn {
            email: email.to_string(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        })
    }
}

/// Sign-up screen values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl Form for SignUpForm {
    type Output = SignUp;

    fn validate(&self) -> Result<SignUp, FieldErrors> {
        let email = self.email.trim();
        let mut errors = FieldErrors::new();
        errors.check("fullName", validate_full_name(&self.full_name));
        errors.check("email", validate_email(email));
        errors.check("password", validate_new_password(&self.password));
        errors.check(
            "confirmPassword",
            validate_confirmation(&self.password, &self.confirm_password),
        );

        errors.finish(SignUp {
            full_name: self.full_name.trim().to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

/// Forgot-password screen values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl Form for ForgotPasswordForm {
    type Output = String;

    fn validate(&self) -> Result<String, FieldErrors> {
        let email = self.email.trim();
        let mut errors = FieldErrors::new();
        errors.check("email", validate_email(email));
        errors.finish(email.to_string())
    }
}

/// OTP verification screen values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OtpForm {
    pub otp: String,
}

impl Form for OtpForm {
    type Output = String;

    fn validate(&self) -> Result<String, FieldErrors> {
        let code = self.otp.trim();
        let mut errors = FieldErrors::new();
        errors.check("otp", validate_otp(code));
        errors.finish(code.to_string())
    }
}

/// New-password screen values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl Form for NewPasswordForm {
    type Output = String;

    fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("password", validate_new_password(&self.password));
        errors.check(
            "confirmPassword",
            validate_confirmation(&self.password, &self.confirm_password),
        );
        errors.finish(self.password.clone())
    }
}

/// Shared "required" check for forms in other modules.
pub(crate) fn check_required(errors: &mut FieldErrors, field: &str, value: &str) {
    errors.check(field, required(field, value));
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("customer@example.com").is_ok());
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.co.uk").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("no-at-symbol").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("user@example.").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("user name@example.com").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Ann").is_ok());
        assert!(validate_full_name("  ").is_err());
        assert!(validate_full_name("A").is_err());
        assert!(validate_full_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_password_checklist() {
        let checklist = password_checklist("pass");
        assert_eq!(checklist.len(), 5);
        let met: Vec<_> = checklist
            .iter()
            .filter(|r| r.is_met)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(met, vec!["lowercase"]);

        assert!(password_checklist("Pass123!").iter().all(|r| r.is_met));
    }

    #[test]
    fn test_validate_new_password_reports_first_unmet_rule() {
        assert!(validate_new_password("Pass123!").is_ok());
        assert!(matches!(
            validate_new_password("Pa1!"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
        let err = validate_new_password("password123!").unwrap_err();
        assert_eq!(
            err.to_string(),
            "password has invalid format: must contain an uppercase letter"
        );
        assert!(validate_new_password("Password123").is_err());
    }

    #[test]
    fn test_validate_otp() {
        assert!(validate_otp("0427").is_ok());
        assert!(validate_otp("").is_err());
        assert!(validate_otp("123").is_err());
        assert!(validate_otp("12a4").is_err());
        assert!(validate_otp("12345").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0855-3234-2345").is_ok());
        assert!(validate_phone("+44 (20) 7946 0958").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  mint ").unwrap(), "mint");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_sign_in_form_collects_all_errors() {
        let errors = SignInForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("email is required"));
        assert_eq!(errors.get("password"), Some("password is required"));
    }

    #[test]
    fn test_sign_in_form_does_not_check_strength() {
        let form = SignInForm {
            email: " customer@example.com ".to_string(),
            password: "weak".to_string(),
            remember_me: true,
        };
        let sign_in = form.validate().unwrap();
        assert_eq!(sign_in.email, "customer@example.com");
        assert!(sign_in.remember_me);
    }

    #[test]
    fn test_sign_up_form() {
        let mut form = SignUpForm {
            full_name: " Rashida Musa ".to_string(),
            email: "rashida@example.com".to_string(),
            password: "Garden#2024".to_string(),
            confirm_password: "Garden#2024".to_string(),
            role: UserRole::Vendor,
        };
        let sign_up = form.validate().unwrap();
        assert_eq!(sign_up.full_name, "Rashida Musa");
        assert_eq!(sign_up.role, UserRole::Vendor);

        form.confirm_password = "Garden#2025".to_string();
        form.password = "short".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.get("password").is_some());
        assert_eq!(
            errors.get("confirmPassword"),
            Some("confirmPassword does not match")
        );
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn test_new_password_and_otp_forms() {
        let form = NewPasswordForm {
            password: "Fresh#Mint9".to_string(),
            confirm_password: "Fresh#Mint9".to_string(),
        };
        assert_eq!(form.validate().unwrap(), "Fresh#Mint9");

        let form = OtpForm {
            otp: " 1234 ".to_string(),
        };
        assert_eq!(form.validate().unwrap(), "1234");

        let form = ForgotPasswordForm {
            email: "nope".to_string(),
        };
        assert!(form.validate().unwrap_err().get("email").is_some());
    }
}
