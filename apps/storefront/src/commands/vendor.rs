//! # Vendor Listing Commands
//!
//! The vendor's product list: add, edit and delete through the product
//! modal. All commands require a signed-in vendor.

use greencart_core::validation::Form;
use greencart_core::vendor::ListingForm;
use greencart_core::VendorListing;
use tracing::{debug, info};

use super::{require_vendor, simulate_latency};
use crate::error::ApiError;
use crate::state::{ConfigState, ListingState, SessionState};

/// Lists the vendor's products in display order.
pub fn list_listings(
    session: &SessionState,
    listings: &ListingState,
) -> Result<Vec<VendorListing>, ApiError> {
    require_vendor(session)?;
    debug!("list_listings command");

    Ok(listings.with_listings(|l| l.listings().to_vec()))
}

/// Adds a product from the modal.
///
/// ## Errors
/// - `VALIDATION_ERROR` with field errors for `name`, `price` or `image`
pub async fn add_listing(
    session: &SessionState,
    listings: &ListingState,
    config: &ConfigState,
    form: ListingForm,
) -> Result<VendorListing, ApiError> {
    require_vendor(session)?;
    let draft = form.validate()?;
    debug!(name = %draft.name, "add_listing command");

    let listing = listings.with_listings_mut(|l| l.add(draft));
    info!(id = %listing.id, name = %listing.name, "Listing added");

    simulate_latency(config).await;
    Ok(listing)
}

/// Replaces a listing's fields, keeping its id and position.
pub async fn edit_listing(
    session: &SessionState,
    listings: &ListingState,
    config: &ConfigState,
    id: &str,
    form: ListingForm,
) -> Result<VendorListing, ApiError> {
    require_vendor(session)?;
    let draft = form.validate()?;
    debug!(id = %id, "edit_listing command");

    let listing = listings.with_listings_mut(|l| l.edit(id, draft))?;

    simulate_latency(config).await;
    Ok(listing)
}

/// Deletes a listing.
///
/// ## Errors
/// - `NOT_FOUND` if no listing has `id`
pub async fn delete_listing(
    session: &SessionState,
    listings: &ListingState,
    config: &ConfigState,
    id: &str,
) -> Result<VendorListing, ApiError> {
    require_vendor(session)?;
    debug!(id = %id, "delete_listing command");

    let removed = listings
        .with_listings_mut(|l| l.delete(id))
        .ok_or_else(|| ApiError::not_found("Listing", id))?;
    info!(id = %removed.id, "Listing deleted");

    simulate_latency(config).await;
    Ok(removed)
}
