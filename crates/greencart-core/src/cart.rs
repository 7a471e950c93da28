//! # Cart Store
//!
//! The customer's cart: at most one line per product, each with a quantity
//! of at least one. The total is derived from the lines on every read.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action            Operation               Line Change           │
//! │  ─────────────            ─────────               ───────────           │
//! │                                                                         │
//! │  "Add to Cart" ─────────► add_to_cart(p, n) ────► qty += n / new line  │
//! │                                                                         │
//! │  "+" / "-" ─────────────► increment / decrement ► qty ± 1 (min 1)      │
//! │                                                                         │
//! │  Typed quantity ────────► update_quantity(id, n) ► qty = n (n ≥ 1)     │
//! │                                                                         │
//! │  Trash icon ────────────► remove_from_cart(id) ─► line removed         │
//! │                                                                         │
//! │  total() = Σ line.quantity × line.product.price   (never stored)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Missing Lines
//! Operations addressed by product id treat an unknown id as a no-op and
//! report that nothing changed; they never fail for it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// Catalog products are immutable, so the line keeps its own copy and can
/// price itself without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id
/// - Every quantity is within `1..=MAX_LINE_QUANTITY`
/// - At most `MAX_CART_LINES` lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `product_id`, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }

    /// Adds `quantity` of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity grows by `quantity`
    /// - Otherwise: a new line is appended
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is not in `1..=999`
    /// - `QuantityTooLarge` if the merged quantity would exceed 999
    /// - `CartTooLarge` if a new line would exceed the line limit
    ///
    /// The cart is unchanged on error.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self.line_mut(&product.id) {
            let requested = line.quantity + quantity;
            if requested > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = requested;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// Quantities below 1 are rejected rather than removing the line;
    /// removal is always an explicit [`Cart::remove_from_cart`].
    ///
    /// ## Returns
    /// - `Ok(true)` if the line exists and was updated
    /// - `Ok(false)` if there is no line for `product_id` (no-op, whatever
    ///   the quantity)
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<bool> {
        if self.line(product_id).is_none() {
            return Ok(false);
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// "+" button: one more unit of an existing line.
    pub fn increment(&mut self, product_id: &str) -> CoreResult<bool> {
        match self.line(product_id) {
            Some(line) => {
                let next = line.quantity + 1;
                self.update_quantity(product_id, next)
            }
            None => Ok(false),
        }
    }

    /// "-" button: one fewer unit, clamped at 1.
    ///
    /// Returns `true` only if the quantity actually changed.
    pub fn decrement(&mut self, product_id: &str) -> bool {
        match self.line_mut(product_id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Removes the line for `product_id` and returns it; `None` if absent.
    pub fn remove_from_cart(&mut self, product_id: &str) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| l.product.id == product_id)?;
        Some(self.lines.remove(pos))
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities (the badge on the cart tab).
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ quantity × price over all lines, computed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Totals Summary
// =============================================================================

/// Cart totals for the summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
