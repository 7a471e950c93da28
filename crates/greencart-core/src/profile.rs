//! # Profile Settings
//!
//! Per-user preferences, address book and saved payment methods, plus the
//! profile edit that renames a user or changes their email.
//!
//! ## Ownership
//! ```text
//!   Profiles
//!   └── principal id ──► ProfileSettings
//!                        ├── language, dark_mode
//!                        ├── phone, gender
//!                        ├── AddressBook      (exactly one default when non-empty)
//!                        └── PaymentMethods   (masked cards, crypto wallets)
//! ```
//!
//! Card numbers and CVVs never leave [`CardForm::validate`]; only the last
//! four digits are stored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, FieldErrors, ValidationError};
use crate::session::SessionStore;
use crate::types::Principal;
use crate::validation::{check_required, validate_email, validate_full_name, validate_phone, Form};

// =============================================================================
// Preferences
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Language {
    #[default]
    #[serde(rename = "en-us")]
    EnUs,
    #[serde(rename = "en-uk")]
    EnUk,
    #[serde(rename = "ar")]
    Ar,
    #[serde(rename = "zh")]
    Zh,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::EnUs, Language::EnUk, Language::Ar, Language::Zh];

    pub const fn code(&self) -> &'static str {
        match self {
            Language::EnUs => "en-us",
            Language::EnUk => "en-uk",
            Language::Ar => "ar",
            Language::Zh => "zh",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Language::EnUs => "English(US)",
            Language::EnUk => "English(UK)",
            Language::Ar => "Arabic",
            Language::Zh => "Chinese",
        }
    }

    pub fn from_code(code: &str) -> Result<Language, ValidationError> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "language".to_string(),
                allowed: Language::ALL.iter().map(|l| l.code().to_string()).collect(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

// =============================================================================
// Profile Form
// =============================================================================

/// Edit-profile screen values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    /// Optional; validated only when filled in.
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Gender,
}

impl Form for ProfileForm {
    type Output = ProfileUpdate;

    fn validate(&self) -> Result<ProfileUpdate, FieldErrors> {
        let full_name = self.full_name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();

        let mut errors = FieldErrors::new();
        errors.check("fullName", validate_full_name(full_name));
        errors.check("email", validate_email(email));
        if !phone.is_empty() {
            errors.check("phone", validate_phone(phone));
        }

        errors.finish(ProfileUpdate {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            gender: self.gender,
        })
    }
}

// =============================================================================
// Addresses
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[default]
    Ng,
    Uk,
}

impl Country {
    pub const ALL: [Country; 2] = [Country::Ng, Country::Uk];

    pub const fn code(&self) -> &'static str {
        match self {
            Country::Ng => "ng",
            Country::Uk => "uk",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Country::Ng => "Nigeria",
            Country::Uk => "United Kingdom",
        }
    }

    /// States offered in the picker for this country.
    pub const fn states(&self) -> &'static [&'static str] {
        match self {
            Country::Ng => &["Lagos", "Abuja", "Kano"],
            Country::Uk => &["England", "Scotland", "Wales"],
        }
    }

    fn from_code(code: &str) -> Result<Country, ValidationError> {
        Country::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "country".to_string(),
                allowed: Country::ALL.iter().map(|c| c.code().to_string()).collect(),
            })
    }
}

/// Add/edit address modal values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddressForm {
    pub country: String,
    pub state: String,
    pub locality: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDraft {
    pub country: Country,
    pub state: String,
    pub locality: String,
    pub street: String,
}

impl Form for AddressForm {
    type Output = AddressDraft;

    fn validate(&self) -> Result<AddressDraft, FieldErrors> {
        let state = self.state.trim();
        let locality = self.locality.trim();
        let street = self.address.trim();

        let mut errors = FieldErrors::new();
        let country = match Country::from_code(self.country.trim()) {
            Ok(country) => country,
            Err(e) => {
                errors.insert("country", e.to_string());
                Country::default()
            }
        };

        check_required(&mut errors, "state", state);
        if !state.is_empty() && errors.get("country").is_none() && !country.states().contains(&state)
        {
            errors.insert(
                "state",
                ValidationError::NotAllowed {
                    field: "state".to_string(),
                    allowed: country.states().iter().map(|s| s.to_string()).collect(),
                }
                .to_string(),
            );
        }
        check_required(&mut errors, "locality", locality);
        check_required(&mut errors, "address", street);

        errors.finish(AddressDraft {
            country,
            state: state.to_string(),
            locality: locality.to_string(),
            street: street.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    /// "Home" or "Work".
    pub label: String,
    pub country: Country,
    pub state: String,
    pub locality: String,
    pub street: String,
    pub is_default: bool,
}

impl Address {
    /// One-line form: `street, locality, state, country`.
    pub fn display(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.street,
            self.locality,
            self.state,
            self.country.name()
        )
    }
}

/// A user's delivery addresses.
///
/// Invariant: when non-empty, exactly one address is the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddressBook {
    addresses: Vec<Address>,
}

impl AddressBook {
    pub fn new() -> Self {
        AddressBook {
            addresses: Vec::new(),
        }
    }

    /// Home and work sample addresses, home being the default.
    pub fn seeded() -> Self {
        let address = |id: &str, label: &str, street: &str, locality: &str, state: &str| Address {
            id: id.to_string(),
            label: label.to_string(),
            country: Country::Ng,
            state: state.to_string(),
            locality: locality.to_string(),
            street: street.to_string(),
            is_default: id == "1",
        };
        AddressBook {
            addresses: vec![
                address("1", "Home", "123 Green Street", "Plant City", "Lagos"),
                address("2", "Work", "456 Office Road", "Business District", "Abuja"),
            ],
        }
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn find(&self, id: &str) -> Option<&Address> {
        self.addresses.iter().find(|a| a.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Adds a home address. The first address becomes the default.
    pub fn add(&mut self, draft: AddressDraft) -> Address {
        let address = Address {
            id: Uuid::new_v4().to_string(),
            label: "Home".to_string(),
            country: draft.country,
            state: draft.state,
            locality: draft.locality,
            street: draft.street,
            is_default: self.addresses.is_empty(),
        };
        self.addresses.push(address.clone());
        address
    }

    /// Replaces the location of an address; id, label and default flag stay.
    pub fn edit(&mut self, id: &str, draft: AddressDraft) -> CoreResult<Address> {
        let address = self
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::not_found("Address", id))?;

        address.country = draft.country;
        address.state = draft.state;
        address.locality = draft.locality;
        address.street = draft.street;
        Ok(address.clone())
    }

    /// Removes an address. If it was the default, the first remaining
    /// address takes over. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> Option<Address> {
        let index = self.addresses.iter().position(|a| a.id == id)?;
        let removed = self.addresses.remove(index);
        if removed.is_default {
            if let Some(first) = self.addresses.first_mut() {
                first.is_default = true;
            }
        }
        Some(removed)
    }

    pub fn set_default(&mut self, id: &str) -> CoreResult<()> {
        if self.find(id).is_none() {
            return Err(CoreError::not_found("Address", id));
        }
        for address in &mut self.addresses {
            address.is_default = address.id == id;
        }
        Ok(())
    }
}

// =============================================================================
// Payment Methods
// =============================================================================

/// Currencies offered in the crypto wallet picker.
pub const CRYPTO_CURRENCIES: [&str; 4] = [
    "Bitcoin (BTC)",
    "Ethereum (ETH)",
    "Binance Coin (BNB)",
    "Cardano (ADA)",
];

/// Add-card modal values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CardForm {
    pub number: String,
    pub name: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

/// What is kept of a card after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub last_four: String,
    pub holder: String,
    pub expiry: String,
}

fn validate_card_number(number: &str) -> Result<String, ValidationError> {
    let digits: String = number.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "number".to_string(),
        });
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) || !(12..=19).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "number".to_string(),
            reason: "must be 12 to 19 digits".to_string(),
        });
    }
    Ok(digits)
}

fn validate_expiry(expiry: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidFormat {
        field: "expiry".to_string(),
        reason: "must be MM/YY".to_string(),
    };

    let (month, year) = expiry.split_once('/').ok_or_else(invalid)?;
    if month.len() != 2 || year.len() != 2 {
        return Err(invalid());
    }
    let month: u32 = month.parse().map_err(|_| invalid())?;
    year.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(())
}

fn validate_cvv(cvv: &str) -> Result<(), ValidationError> {
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 or 4 digits".to_string(),
        });
    }
    Ok(())
}

impl Form for CardForm {
    type Output = CardDraft;

    fn validate(&self) -> Result<CardDraft, FieldErrors> {
        let holder = self.name.trim();
        let expiry = self.expiry.trim();

        let mut errors = FieldErrors::new();
        let last_four = match validate_card_number(self.number.trim()) {
            Ok(digits) => digits[digits.len() - 4..].to_string(),
            Err(e) => {
                errors.insert("number", e.to_string());
                String::new()
            }
        };
        check_required(&mut errors, "name", holder);
        errors.check("expiry", validate_expiry(expiry));
        errors.check("cvv", validate_cvv(self.cvv.trim()));

        errors.finish(CardDraft {
            last_four,
            holder: holder.to_string(),
            expiry: expiry.to_string(),
        })
    }
}

/// Add-crypto-wallet modal values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CryptoWalletForm {
    pub currency: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletDraft {
    pub currency: String,
    pub address: String,
}

impl Form for CryptoWalletForm {
    type Output = WalletDraft;

    fn validate(&self) -> Result<WalletDraft, FieldErrors> {
        let currency = self.currency.trim();
        let address = self.address.trim();

        let mut errors = FieldErrors::new();
        if !CRYPTO_CURRENCIES.contains(&currency) {
            errors.insert(
                "currency",
                ValidationError::NotAllowed {
                    field: "currency".to_string(),
                    allowed: CRYPTO_CURRENCIES.iter().map(|c| c.to_string()).collect(),
                }
                .to_string(),
            );
        }
        check_required(&mut errors, "address", address);

        errors.finish(WalletDraft {
            currency: currency.to_string(),
            address: address.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SavedPaymentMethod {
    #[serde(rename_all = "camelCase")]
    Card {
        id: String,
        last_four: String,
        holder: String,
        expiry: String,
    },
    #[serde(rename_all = "camelCase")]
    CryptoWallet {
        id: String,
        currency: String,
        address: String,
    },
}

impl SavedPaymentMethod {
    pub fn id(&self) -> &str {
        match self {
            SavedPaymentMethod::Card { id, .. } | SavedPaymentMethod::CryptoWallet { id, .. } => id,
        }
    }

    /// Text shown in the list, e.g. `•••• 4242`.
    pub fn masked(&self) -> String {
        match self {
            SavedPaymentMethod::Card { last_four, .. } => format!("•••• {}", last_four),
            SavedPaymentMethod::CryptoWallet {
                currency, address, ..
            } => {
                let tail: String = address
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("{} …{}", currency, tail)
            }
        }
    }
}

/// Saved payment methods in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentMethods {
    methods: Vec<SavedPaymentMethod>,
}

impl PaymentMethods {
    pub fn new() -> Self {
        PaymentMethods {
            methods: Vec::new(),
        }
    }

    pub fn methods(&self) -> &[SavedPaymentMethod] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn add_card(&mut self, card: CardDraft) -> SavedPaymentMethod {
        self.push(SavedPaymentMethod::Card {
            id: Uuid::new_v4().to_string(),
            last_four: card.last_four,
            holder: card.holder,
            expiry: card.expiry,
        })
    }

    pub fn add_wallet(&mut self, wallet: WalletDraft) -> SavedPaymentMethod {
        self.push(SavedPaymentMethod::CryptoWallet {
            id: Uuid::new_v4().to_string(),
            currency: wallet.currency,
            address: wallet.address,
        })
    }

    fn push(&mut self, method: SavedPaymentMethod) -> SavedPaymentMethod {
        self.methods.push(method.clone());
        method
    }

    /// Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<SavedPaymentMethod> {
        let index = self.methods.iter().position(|m| m.id() == id)?;
        Some(self.methods.remove(index))
    }
}

// =============================================================================
// Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub language: Language,
    pub dark_mode: bool,
    pub phone: Option<String>,
    pub gender: Gender,
    pub addresses: AddressBook,
    pub payment_methods: PaymentMethods,
}

impl ProfileSettings {
    /// Settings a brand-new user starts with, sample addresses included.
    pub fn seeded() -> Self {
        ProfileSettings {
            addresses: AddressBook::seeded(),
            ..ProfileSettings::default()
        }
    }
}

/// Settings of every user who has opened their profile, keyed by principal id.
#[derive(Debug, Clone, Default)]
pub struct Profiles {
    settings: HashMap<String, ProfileSettings>,
}

impl Profiles {
    pub fn new() -> Self {
        Profiles {
            settings: HashMap::new(),
        }
    }

    pub fn get(&self, principal_id: &str) -> Option<&ProfileSettings> {
        self.settings.get(principal_id)
    }

    /// The user's settings, created from [`ProfileSettings::seeded`] on first use.
    pub fn settings_mut(&mut self, principal_id: &str) -> &mut ProfileSettings {
        self.settings
            .entry(principal_id.to_string())
            .or_insert_with(ProfileSettings::seeded)
    }

    /// Applies an edit-profile submission for the signed-in user.
    ///
    /// Name and email change in the directory and the session; phone and
    /// gender are stored here. Nothing changes on error.
    pub fn update_profile(
        &mut self,
        session: &mut SessionStore,
        update: ProfileUpdate,
    ) -> CoreResult<Principal> {
        let principal = session.update_identity(&update.full_name, &update.email)?;

        let settings = self.settings_mut(&principal.id);
        settings.phone = update.phone;
        settings.gender = update.gender;
        Ok(principal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CredentialHasher, HashParams, UserDirectory};

    fn address_form(country: &str, state: &str, street: &str) -> AddressForm {
        AddressForm {
            country: country.to_string(),
            state: state.to_string(),
            locality: "Local 1".to_string(),
            address: street.to_string(),
        }
    }

    fn draft(street: &str) -> AddressDraft {
        address_form("ng", "Lagos", street).validate().unwrap()
    }

    fn signed_in_session() -> SessionStore {
        let hasher = CredentialHasher::new(HashParams::MINIMAL).unwrap();
        let mut session = SessionStore::new(UserDirectory::seeded(hasher).unwrap());
        session.sign_in("customer@example.com", "Pass123!").unwrap();
        session
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::default(), Language::EnUs);
        assert_eq!(Language::from_code("zh").unwrap(), Language::Zh);
        assert!(Language::from_code("fr").is_err());
        assert_eq!(
            serde_json::to_string(&Language::EnUk).unwrap(),
            "\"en-uk\""
        );
    }

    #[test]
    fn test_profile_form() {
        let form = ProfileForm {
            full_name: " Mark J ".to_string(),
            email: "mark@example.com".to_string(),
            phone: String::new(),
            gender: Gender::Male,
        };
        let update = form.validate().unwrap();
        assert_eq!(update.full_name, "Mark J");
        assert_eq!(update.phone, None);

        let bad = ProfileForm {
            full_name: "M".to_string(),
            email: "nope".to_string(),
            phone: "12ab".to_string(),
            gender: Gender::Female,
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_address_form_checks_state_against_country() {
        assert!(address_form("uk", "Wales", "1 High St").validate().is_ok());

        let errors = address_form("uk", "Lagos", "1 High St")
            .validate()
            .unwrap_err();
        assert!(errors.get("state").is_some());

        let errors = address_form("fr", "", "").validate().unwrap_err();
        assert!(errors.get("country").is_some());
        assert!(errors.get("state").is_some());
        assert!(errors.get("address").is_some());
    }

    #[test]
    fn test_first_address_becomes_default() {
        let mut book = AddressBook::new();
        let first = book.add(draft("1 First Ave"));
        let second = book.add(draft("2 Second Ave"));

        assert!(first.is_default);
        assert!(!second.is_default);
        assert_eq!(book.default_address().unwrap().id, first.id);
        assert_eq!(first.display(), "1 First Ave, Local 1, Lagos, Nigeria");
    }

    #[test]
    fn test_deleting_default_promotes_next() {
        let mut book = AddressBook::seeded();
        book.delete("1").unwrap();
        assert_eq!(book.default_address().unwrap().id, "2");

        book.delete("2").unwrap();
        assert!(book.default_address().is_none());
        assert!(book.delete("2").is_none());
    }

    #[test]
    fn test_set_default_and_edit() {
        let mut book = AddressBook::seeded();
        book.set_default("2").unwrap();
        assert_eq!(book.default_address().unwrap().id, "2");
        assert_eq!(book.addresses().iter().filter(|a| a.is_default).count(), 1);
        assert!(book.set_default("9").is_err());

        let edited = book.edit("2", draft("9 New Road")).unwrap();
        assert!(edited.is_default);
        assert_eq!(edited.label, "Work");
        assert_eq!(edited.street, "9 New Road");
        assert!(matches!(
            book.edit("9", draft("x")),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_card_form_keeps_only_last_four() {
        let card = CardForm {
            number: "4242 4242 4242 4242".to_string(),
            name: "Mark Jonathan".to_string(),
            expiry: "08/27".to_string(),
            cvv: "123".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(card.last_four, "4242");

        let mut methods = PaymentMethods::new();
        let saved = methods.add_card(card);
        assert_eq!(saved.masked(), "•••• 4242");

        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["kind"], "card");
        assert_eq!(json["lastFour"], "4242");
        assert!(!json.to_string().contains("4242 4242"));
    }

    #[test]
    fn test_card_form_errors() {
        let errors = CardForm {
            number: "1234".to_string(),
            name: String::new(),
            expiry: "13/27".to_string(),
            cvv: "12".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_crypto_wallet() {
        let wallet = CryptoWalletForm {
            currency: "Ethereum (ETH)".to_string(),
            address: "0xabc123def456".to_string(),
        }
        .validate()
        .unwrap();

        let mut methods = PaymentMethods::new();
        let saved = methods.add_wallet(wallet);
        assert_eq!(saved.masked(), "Ethereum (ETH) …f456");

        assert!(methods.remove(saved.id()).is_some());
        assert!(methods.is_empty());
        assert!(methods.remove("missing").is_none());

        let errors = CryptoWalletForm {
            currency: "Dogecoin".to_string(),
            address: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_update_profile() {
        let mut session = signed_in_session();
        let mut profiles = Profiles::new();

        let update = ProfileUpdate {
            full_name: "Mark J".to_string(),
            email: "mark@example.com".to_string(),
            phone: Some("+234 801 234 5678".to_string()),
            gender: Gender::Male,
        };
        let principal = profiles.update_profile(&mut session, update).unwrap();

        assert_eq!(principal.email, "mark@example.com");
        assert_eq!(session.current().unwrap().full_name, "Mark J");
        assert_eq!(
            profiles.get("1").unwrap().phone.as_deref(),
            Some("+234 801 234 5678")
        );
        assert!(session
            .directory()
            .authenticate("mark@example.com", "Pass123!")
            .is_ok());
    }

    #[test]
    fn test_update_profile_duplicate_email() {
        let mut session = signed_in_session();
        let mut profiles = Profiles::new();

        let update = ProfileUpdate {
            full_name: "Mark".to_string(),
            email: "vendor@example.com".to_string(),
            phone: None,
            gender: Gender::Male,
        };
        let err = profiles.update_profile(&mut session, update).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateEmail(_)));
        assert!(profiles.get("1").is_none());
        assert_eq!(session.current().unwrap().email, "customer@example.com");
    }

    #[test]
    fn test_settings_created_on_first_use() {
        let mut profiles = Profiles::new();
        let settings = profiles.settings_mut("1");
        settings.dark_mode = true;
        settings.language = Language::Ar;

        let settings = profiles.get("1").unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.addresses.len(), 2);
    }
}
