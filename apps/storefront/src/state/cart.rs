//! # Cart State
//!
//! Thread-safe wrapper around the core [`Cart`].

use std::sync::{Arc, Mutex};

use greencart_core::cart::Cart;

use super::lock;

/// Managed cart state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>`: cart operations are quick and nearly all of
/// them write, so a `RwLock` would buy nothing.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = lock(&self.cart);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_to_cart(&product, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = lock(&self.cart);
        f(&mut cart)
    }
}
