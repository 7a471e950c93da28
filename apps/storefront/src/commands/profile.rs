//! # Profile Commands
//!
//! Edit profile, preferences, delivery addresses and saved payment methods
//! for the signed-in user. Customers and vendors share these commands.
//!
//! Settings are created on first access, with the sample addresses, so a
//! fresh account has something to show on the address screen.

use greencart_core::profile::{
    Address, AddressForm, CardForm, CryptoWalletForm, Language, ProfileForm, ProfileSettings,
    SavedPaymentMethod,
};
use greencart_core::validation::Form;
use greencart_core::Principal;
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::{require_principal, simulate_latency};
use crate::error::ApiError;
use crate::state::{ConfigState, ProfileState, SessionState};

/// The profile screen: who the user is plus their settings.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub principal: Principal,
    pub settings: ProfileSettings,
}

/// Runs `f` on the signed-in user's settings.
fn with_settings_mut<F, R>(
    session: &SessionState,
    profile: &ProfileState,
    f: F,
) -> Result<R, ApiError>
where
    F: FnOnce(&mut ProfileSettings) -> Result<R, ApiError>,
{
    let principal = require_principal(session)?;
    profile.with_profiles_mut(|p| f(p.settings_mut(&principal.id)))
}

/// Gets the profile screen data.
pub fn get_profile(
    session: &SessionState,
    profile: &ProfileState,
) -> Result<ProfileResponse, ApiError> {
    debug!("get_profile command");
    let principal = require_principal(session)?;
    let settings = profile.with_profiles_mut(|p| p.settings_mut(&principal.id).clone());

    Ok(ProfileResponse {
        principal,
        settings,
    })
}

/// Saves the edit-profile form.
///
/// ## Errors
/// - `VALIDATION_ERROR` with field errors
/// - `DUPLICATE_EMAIL` if the new email belongs to another account
pub async fn update_profile(
    session: &SessionState,
    profile: &ProfileState,
    config: &ConfigState,
    form: ProfileForm,
) -> Result<ProfileResponse, ApiError> {
    let update = form.validate()?;
    debug!(email = %update.email, "update_profile command");

    let (principal, settings) = session.with_session_mut(|s| {
        profile.with_profiles_mut(|p| {
            let principal = p.update_profile(s, update)?;
            let settings = p.settings_mut(&principal.id).clone();
            Ok::<_, ApiError>((principal, settings))
        })
    })?;

    info!(user_id = %principal.id, "Profile updated");
    simulate_latency(config).await;

    Ok(ProfileResponse {
        principal,
        settings,
    })
}

/// Lists the languages offered on the language screen.
pub fn list_languages() -> Vec<Language> {
    Language::ALL.to_vec()
}

/// Sets the display language by code (`en-us`, `en-uk`, `ar`, `zh`).
pub fn set_language(
    session: &SessionState,
    profile: &ProfileState,
    code: &str,
) -> Result<Language, ApiError> {
    debug!(code = %code, "set_language command");
    let language = Language::from_code(code).map_err(|e| ApiError::validation(e.to_string()))?;

    with_settings_mut(session, profile, |s| {
        s.language = language;
        Ok(language)
    })
}

/// Toggles dark mode.
pub fn set_dark_mode(
    session: &SessionState,
    profile: &ProfileState,
    enabled: bool,
) -> Result<bool, ApiError> {
    debug!(enabled, "set_dark_mode command");
    with_settings_mut(session, profile, |s| {
        s.dark_mode = enabled;
        Ok(enabled)
    })
}

// =============================================================================
// Addresses
// =============================================================================

pub fn list_addresses(
    session: &SessionState,
    profile: &ProfileState,
) -> Result<Vec<Address>, ApiError> {
    debug!("list_addresses command");
    with_settings_mut(session, profile, |s| Ok(s.addresses.addresses().to_vec()))
}

/// Adds an address from the modal. The first address becomes the default.
pub fn add_address(
    session: &SessionState,
    profile: &ProfileState,
    form: AddressForm,
) -> Result<Address, ApiError> {
    let draft = form.validate()?;
    debug!(country = %draft.country.code(), "add_address command");

    with_settings_mut(session, profile, |s| Ok(s.addresses.add(draft)))
}

pub fn edit_address(
    session: &SessionState,
    profile: &ProfileState,
    id: &str,
    form: AddressForm,
) -> Result<Address, ApiError> {
    let draft = form.validate()?;
    debug!(id = %id, "edit_address command");

    with_settings_mut(session, profile, |s| Ok(s.addresses.edit(id, draft)?))
}

/// Deletes an address; the list is returned so a new default shows at once.
pub fn delete_address(
    session: &SessionState,
    profile: &ProfileState,
    id: &str,
) -> Result<Vec<Address>, ApiError> {
    debug!(id = %id, "delete_address command");

    with_settings_mut(session, profile, |s| {
        s.addresses
            .delete(id)
            .ok_or_else(|| ApiError::not_found("Address", id))?;
        Ok(s.addresses.addresses().to_vec())
    })
}

pub fn set_default_address(
    session: &SessionState,
    profile: &ProfileState,
    id: &str,
) -> Result<Vec<Address>, ApiError> {
    debug!(id = %id, "set_default_address command");

    with_settings_mut(session, profile, |s| {
        s.addresses.set_default(id)?;
        Ok(s.addresses.addresses().to_vec())
    })
}

// =============================================================================
// Payment Methods
// =============================================================================

pub fn list_payment_methods(
    session: &SessionState,
    profile: &ProfileState,
) -> Result<Vec<SavedPaymentMethod>, ApiError> {
    debug!("list_payment_methods command");
    with_settings_mut(session, profile, |s| Ok(s.payment_methods.methods().to_vec()))
}

/// Saves a card. Only the last four digits are kept.
pub fn add_card(
    session: &SessionState,
    profile: &ProfileState,
    form: CardForm,
) -> Result<SavedPaymentMethod, ApiError> {
    let card = form.validate()?;
    debug!(last_four = %card.last_four, "add_card command");

    with_settings_mut(session, profile, |s| Ok(s.payment_methods.add_card(card)))
}

pub fn add_crypto_wallet(
    session: &SessionState,
    profile: &ProfileState,
    form: CryptoWalletForm,
) -> Result<SavedPaymentMethod, ApiError> {
    let wallet = form.validate()?;
    debug!(currency = %wallet.currency, "add_crypto_wallet command");

    with_settings_mut(session, profile, |s| Ok(s.payment_methods.add_wallet(wallet)))
}

pub fn remove_payment_method(
    session: &SessionState,
    profile: &ProfileState,
    id: &str,
) -> Result<SavedPaymentMethod, ApiError> {
    debug!(id = %id, "remove_payment_method command");

    with_settings_mut(session, profile, |s| {
        s.payment_methods
            .remove(id)
            .ok_or_else(|| ApiError::not_found("Payment method", id))
    })
}
