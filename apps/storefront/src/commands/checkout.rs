//! # Checkout Command
//!
//! Pays for the cart. Payment is simulated: the chosen method is recorded
//! on the receipt and nothing is charged.
//!
//! ## Flow
//! ```text
//! cart (non-empty) ──► checkout(method) ──► Receipt
//!                            │
//!                            ├── one on-transit order per line
//!                            └── cart cleared
//! ```

use chrono::Utc;
use greencart_core::checkout::{self, PaymentMethod, Receipt};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::{require_principal, simulate_latency};
use crate::error::ApiError;
use crate::state::{CartState, ConfigState, OrderState, SessionState};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub receipt: Receipt,
    pub formatted_total: String,
}

/// Lists the payment options in display order.
pub fn list_payment_options() -> Vec<PaymentMethod> {
    PaymentMethod::ALL.to_vec()
}

/// Pays for everything in the cart.
///
/// ## Errors
/// - `UNAUTHENTICATED` without a signed-in user
/// - `EMPTY_CART` if there is nothing to pay for; nothing changes
pub async fn checkout(
    session: &SessionState,
    cart: &CartState,
    orders: &OrderState,
    config: &ConfigState,
    method: PaymentMethod,
) -> Result<CheckoutResponse, ApiError> {
    let principal = require_principal(session)?;
    debug!(method = %method, "checkout command");

    let receipt = cart.with_cart_mut(|c| {
        orders.with_orders_mut(|o| checkout::checkout(c, o, method, Utc::now()))
    })?;

    info!(
        user_id = %principal.id,
        receipt = %receipt.receipt_number,
        total = receipt.total.cents(),
        "Checkout complete"
    );
    simulate_latency(config).await;

    Ok(CheckoutResponse {
        formatted_total: config.format_money(receipt.total),
        receipt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cart, test_support};
    use crate::error::ErrorCode;
    use greencart_core::OrderStatus;

    #[tokio::test]
    async fn test_checkout_places_orders_and_clears_cart() {
        let app = test_support::customer();
        cart::add_to_cart(&app.catalog, &app.cart, &app.config, "3", Some(2))
            .await
            .unwrap();

        let response = checkout(
            &app.session,
            &app.cart,
            &app.orders,
            &app.config,
            PaymentMethod::Paypal,
        )
        .await
        .unwrap();

        assert_eq!(response.receipt.total.cents(), 4998);
        assert_eq!(response.formatted_total, "$49.98");
        assert_eq!(response.receipt.method, PaymentMethod::Paypal);
        assert_eq!(response.receipt.total_quantity(), 2);
        assert!(app.cart.with_cart(|c| c.is_empty()));

        let in_transit = app.orders.with_orders(|o| {
            o.orders()
                .iter()
                .filter(|order| order.status == OrderStatus::OnTransit)
                .count()
        });
        assert_eq!(in_transit, 3);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let app = test_support::customer();
        let err = checkout(
            &app.session,
            &app.cart,
            &app.orders,
            &app.config,
            PaymentMethod::Card,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(app.orders.with_orders(|o| o.len()), 6);
    }

    #[test]
    fn test_payment_options() {
        let options = list_payment_options();
        assert_eq!(options.first(), Some(&PaymentMethod::Card));
        assert_eq!(options.len(), 3);
    }
}
