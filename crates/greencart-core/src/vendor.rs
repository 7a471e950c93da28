//! # Vendor Listings
//!
//! The products a vendor manages from the "Manage Products" screen.
//!
//! ## Edit Flow
//! ```text
//!   ListingForm { name, price: "12.5", image }
//!        │ validate()
//!        ▼
//!   ListingDraft { name, price: Money(1250), image }
//!        │
//!        ├── add(draft)       → new listing, fresh id
//!        └── edit(id, draft)  → NotFound if id is unknown
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, FieldErrors};
use crate::money::Money;
use crate::types::VendorListing;
use crate::validation::{check_required, Form};

// =============================================================================
// Listing Form
// =============================================================================

/// Add/edit product modal values. `price` is the raw text input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListingForm {
    pub name: String,
    pub price: String,
    pub image: String,
}

/// A validated listing without an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    pub name: String,
    pub price: Money,
    pub image: String,
}

impl Form for ListingForm {
    type Output = ListingDraft;

    fn validate(&self) -> Result<ListingDraft, FieldErrors> {
        let name = self.name.trim();
        let image = self.image.trim();

        let mut errors = FieldErrors::new();
        check_required(&mut errors, "name", name);

        let price = match Money::parse(&self.price) {
            Ok(price) => price,
            Err(e) => {
                errors.insert("price", e.to_string());
                Money::zero()
            }
        };

        check_required(&mut errors, "image", image);

        errors.finish(ListingDraft {
            name: name.to_string(),
            price,
            image: image.to_string(),
        })
    }
}

// =============================================================================
// Listing Store
// =============================================================================

/// A vendor's listings, in display order.
#[derive(Debug, Clone, Default)]
pub struct VendorListings {
    listings: Vec<VendorListing>,
}

impl VendorListings {
    pub fn new() -> Self {
        VendorListings {
            listings: Vec::new(),
        }
    }

    pub fn seeded() -> Self {
        let seed = [
            ("1", "Aloe Vera", 200, 4505161),
            ("2", "Lavender Oil", 500, 6621472),
            ("3", "Chamomile Tea", 150, 1417945),
            ("4", "Peppermint Balm", 250, 678414),
            ("5", "Eucalyptus Oil", 350, 161599),
            ("6", "Rose Water", 180, 965989),
            ("7", "Turmeric Powder", 120, 461382),
        ];

        let listings = seed
            .into_iter()
            .map(|(id, name, price, photo)| VendorListing {
                id: id.to_string(),
                name: name.to_string(),
                price: Money::from_major_minor(price, 0),
                image: format!(
                    "https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg",
                    photo
                ),
            })
            .collect();

        VendorListings { listings }
    }

    pub fn listings(&self) -> &[VendorListing] {
        &self.listings
    }

    pub fn find(&self, id: &str) -> Option<&VendorListing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Appends a listing under a fresh id.
    pub fn add(&mut self, draft: ListingDraft) -> VendorListing {
        let listing = VendorListing {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            price: draft.price,
            image: draft.image,
        };
        self.listings.push(listing.clone());
        listing
    }

    /// Replaces name, price and image of an existing listing. The id is kept.
    pub fn edit(&mut self, id: &str, draft: ListingDraft) -> CoreResult<VendorListing> {
        let listing = self
            .listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CoreError::not_found("Listing", id))?;

        listing.name = draft.name;
        listing.price = draft.price;
        listing.image = draft.image;
        Ok(listing.clone())
    }

    /// Removes a listing. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> Option<VendorListing> {
        let index = self.listings.iter().position(|l| l.id == id)?;
        Some(self.listings.remove(index))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str, image: &str) -> ListingForm {
        ListingForm {
            name: name.to_string(),
            price: price.to_string(),
            image: image.to_string(),
        }
    }

    #[test]
    fn test_listing_form_parses_price() {
        let draft = form(" Sage ", "12.5", "file:///sage.jpg").validate().unwrap();
        assert_eq!(draft.name, "Sage");
        assert_eq!(draft.price, Money::from_cents(1250));
    }

    #[test]
    fn test_listing_form_requires_every_field() {
        let errors = form("", "", "").validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get("name").is_some());
        assert!(errors.get("price").is_some());
        assert!(errors.get("image").is_some());
    }

    #[test]
    fn test_listing_form_rejects_bad_price() {
        let errors = form("Sage", "12.345", "x.jpg").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("price").is_some());

        assert!(form("Sage", "-3", "x.jpg").validate().is_err());
        assert!(form("Sage", "abc", "x.jpg").validate().is_err());
    }

    #[test]
    fn test_seeded_listings() {
        let listings = VendorListings::seeded();
        assert_eq!(listings.len(), 7);
        assert_eq!(listings.find("2").unwrap().name, "Lavender Oil");
        assert_eq!(listings.find("2").unwrap().price, Money::from_cents(50_000));
    }

    #[test]
    fn test_add_assigns_fresh_id() {
        let mut listings = VendorListings::seeded();
        let draft = form("Sage", "3", "x.jpg").validate().unwrap();

        let a = listings.add(draft.clone());
        let b = listings.add(draft);
        assert_ne!(a.id, b.id);
        assert_eq!(listings.len(), 9);
        assert_eq!(listings.listings().last().unwrap().id, b.id);
    }

    #[test]
    fn test_edit_keeps_id() {
        let mut listings = VendorListings::seeded();
        let draft = form("Aloe Vera Gel", "210", "x.jpg").validate().unwrap();

        let edited = listings.edit("1", draft).unwrap();
        assert_eq!(edited.id, "1");
        assert_eq!(edited.name, "Aloe Vera Gel");
        assert_eq!(listings.find("1").unwrap().price, Money::from_cents(21_000));
    }

    #[test]
    fn test_edit_unknown_listing() {
        let mut listings = VendorListings::seeded();
        let draft = form("Sage", "3", "x.jpg").validate().unwrap();
        let err = listings.edit("nope", draft).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(listings.len(), 7);
    }

    #[test]
    fn test_delete() {
        let mut listings = VendorListings::seeded();
        assert_eq!(listings.delete("3").unwrap().name, "Chamomile Tea");
        assert!(listings.find("3").is_none());
        assert!(listings.delete("3").is_none());
        assert_eq!(listings.len(), 6);
    }
}
