//! # Checkout
//!
//! Turns the cart into a receipt and customer orders. No money moves.
//!
//! ## Flow
//! ```text
//!   Cart ──► empty? ──yes──► EmptyCart (cart untouched)
//!              │
//!              no
//!              ▼
//!   snapshot lines ──► Receipt { id, number, lines, total, method, placed_at }
//!              │
//!              ├──► OrderBook::place(lines, today)   (on-transit)
//!              └──► Cart::clear()
//! ```
//!
//! Receipt lines freeze name and unit price at the moment of purchase.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::catalog::OrderBook;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Paypal,
    GooglePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Card,
        PaymentMethod::Paypal,
        PaymentMethod::GooglePay,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::GooglePay => "Google Pay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A purchased line, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub product_id: String,
    /// Product name at time of purchase.
    pub name: String,
    /// Unit price at time of purchase.
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl From<&CartLine> for ReceiptLine {
    fn from(line: &CartLine) -> Self {
        ReceiptLine {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            unit_price: line.product.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    /// Human-readable number, e.g. `240701-142530-3fa8`.
    pub receipt_number: String,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
    pub method: PaymentMethod,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl Receipt {
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Pays for the cart with `method`.
///
/// On success the cart is empty and one on-transit order per line has been
/// added to `orders`. On `EmptyCart` nothing changes.
pub fn checkout(
    cart: &mut Cart,
    orders: &mut OrderBook,
    method: PaymentMethod,
    now: DateTime<Utc>,
) -> CoreResult<Receipt> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let id = Uuid::new_v4();
    let receipt = Receipt {
        id: id.to_string(),
        receipt_number: receipt_number(&id, now),
        lines: cart.lines().iter().map(ReceiptLine::from).collect(),
        total: cart.total(),
        method,
        placed_at: now,
    };

    orders.place(cart.lines(), now.date_naive());
    cart.clear();

    Ok(receipt)
}

fn receipt_number(id: &Uuid, now: DateTime<Utc>) -> String {
    let simple = id.simple().to_string();
    format!("{}-{}", now.format("%y%m%d-%H%M%S"), &simple[..4])
}

// =============================================================================
// Unit Tests
// =============================================================================
