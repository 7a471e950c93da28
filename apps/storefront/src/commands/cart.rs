//! # Cart Commands
//!
//! Cart manipulation for the cart tab and the product detail screen.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_to_cart   ┌──────────┐   checkout    ┌──────────┐
//! │  Empty   │ ─────────────► │ In Cart  │ ────────────► │ Receipt  │
//! │  Cart    │                │          │  (checkout.rs)│          │
//! └──────────┘                └────┬─────┘               └──────────┘
//!      ▲                           │ update_cart_item
//!      │                           │ increment / decrement
//!      │                           │ remove_from_cart
//!      └──────── clear_cart ───────┘
//! ```
//!
//! Every command returns the whole cart so the screen re-renders from one
//! value. Totals are recomputed on each call.

use greencart_core::cart::{Cart, CartLine, CartTotals};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use super::simulate_latency;
use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState};

/// Cart contents plus totals.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    /// Total in display form, e.g. `$37.97`.
    pub formatted_total: String,
}

impl CartResponse {
    fn build(cart: &Cart, config: &ConfigState) -> Self {
        let totals = CartTotals::from(cart);
        CartResponse {
            lines: cart.lines().to_vec(),
            formatted_total: config.format_money(totals.total),
            totals,
        }
    }
}

/// Gets the current cart.
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::build(c, config))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases
/// - Otherwise: added as a new line
///
/// ## Arguments
/// * `product_id` - Catalog product id
/// * `quantity` - Units to add (default: 1)
pub async fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    let product = catalog
        .catalog()
        .find(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let response = cart.with_cart_mut(|c| {
        c.add_to_cart(product, quantity)?;
        Ok::<_, ApiError>(CartResponse::build(c, config))
    })?;

    simulate_latency(config).await;
    Ok(response)
}

/// Sets the quantity of a line.
///
/// Unknown product ids are a no-op; quantities below 1 are rejected.
pub fn update_cart_item(
    cart: &CartState,
    config: &ConfigState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        c.update_quantity(product_id, quantity)?;
        Ok(CartResponse::build(c, config))
    })
}

/// "+" on a cart row.
pub fn increment_cart_item(
    cart: &CartState,
    config: &ConfigState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increment_cart_item command");

    cart.with_cart_mut(|c| {
        c.increment(product_id)?;
        Ok(CartResponse::build(c, config))
    })
}

/// "-" on a cart row. Never goes below 1.
pub fn decrement_cart_item(cart: &CartState, config: &ConfigState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "decrement_cart_item command");

    cart.with_cart_mut(|c| {
        c.decrement(product_id);
        CartResponse::build(c, config)
    })
}

/// Removes a line. Unknown ids are a no-op.
pub fn remove_from_cart(cart: &CartState, config: &ConfigState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_from_cart(product_id);
        CartResponse::build(c, config)
    })
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_merges_and_totals() {
        let app = test_support::customer();

        add_to_cart(&app.catalog, &app.cart, &app.config, "1", None)
            .await
            .unwrap();
        add_to_cart(&app.catalog, &app.cart, &app.config, "2", Some(2))
            .await
            .unwrap();
        let response = add_to_cart(&app.catalog, &app.cart, &app.config, "1", Some(1))
            .await
            .unwrap();

        // 2 × 15.00 + 2 × 12.99
        assert_eq!(response.lines.len(), 2);
        assert_eq!(response.totals.total_quantity, 4);
        assert_eq!(response.totals.total.cents(), 5598);
        assert_eq!(response.formatted_total, "$55.98");
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let app = test_support::customer();
        let err = add_to_cart(&app.catalog, &app.cart, &app.config, "404", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&app.cart, &app.config).lines.is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_zero_quantity() {
        let app = test_support::customer();
        let err = add_to_cart(&app.catalog, &app.cart, &app.config, "1", Some(0))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_row_controls() {
        let app = test_support::customer();
        add_to_cart(&app.catalog, &app.cart, &app.config, "5", None)
            .await
            .unwrap();

        let r = increment_cart_item(&app.cart, &app.config, "5").unwrap();
        assert_eq!(r.lines[0].quantity, 2);

        let r = decrement_cart_item(&app.cart, &app.config, "5");
        assert_eq!(r.lines[0].quantity, 1);

        // Clamped at 1
        let r = decrement_cart_item(&app.cart, &app.config, "5");
        assert_eq!(r.lines[0].quantity, 1);

        let r = update_cart_item(&app.cart, &app.config, "5", 7).unwrap();
        assert_eq!(r.totals.total.cents(), 6993);

        let err = update_cart_item(&app.cart, &app.config, "5", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let r = remove_from_cart(&app.cart, &app.config, "5");
        assert!(r.lines.is_empty());
        assert_eq!(r.formatted_total, "$0.00");
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let app = test_support::customer();
        add_to_cart(&app.catalog, &app.cart, &app.config, "3", Some(3))
            .await
            .unwrap();

        let r = clear_cart(&app.cart, &app.config);
        assert_eq!(r.totals.item_count, 0);
        assert_eq!(r.totals.total_quantity, 0);
    }
}
