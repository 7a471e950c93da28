//! # greencart-core: Pure Business Logic for GreenCart
//!
//! This crate holds every rule of the storefront as plain data and pure
//! functions. The app layer owns state lifetime, logging and clocks; this
//! crate owns what the state means.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       GreenCart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (React Native screens)                 │   │
//! │  │    Sign In ──► Browse ──► Cart ──► Checkout ──► Orders         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              apps/storefront (state + navigator)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ greencart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   session   routing   cart   catalog   vendor   checkout       │   │
//! │  │   recovery  profile   validation   money   types   error       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO CLOCK READS • NO GLOBALS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Principal, Product, Order, ...)
//! - [`money`] - Integer money in minor units
//! - [`error`] - Domain error types
//! - [`validation`] - Field validators and typed form records
//! - [`cart`] - The cart store
//! - [`session`] - User directory and session store
//! - [`routing`] - Route inventory and the route guard
//! - [`catalog`] - Seeded products, categories and order books
//! - [`vendor`] - Vendor listing management
//! - [`checkout`] - Mock checkout producing receipts
//! - [`recovery`] - Forgot-password / OTP / new-password flow
//! - [`profile`] - Per-user profile settings
//!
//! ## Example Usage
//!
//! ```rust
//! use greencart_core::cart::Cart;
//! use greencart_core::catalog::Catalog;
//!
//! let catalog = Catalog::seeded();
//! let mint = catalog.find("5").unwrap().clone();
//!
//! let mut cart = Cart::new();
//! cart.add_to_cart(&mint, 2).unwrap();
//! cart.add_to_cart(&mint, 3).unwrap();
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.total().cents(), 5 * 999);
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod profile;
pub mod recovery;
pub mod routing;
pub mod session;
pub mod types;
pub mod validation;
pub mod vendor;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single product in the cart.
///
/// Guards against a stuck "+" button or a mistyped quantity.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Length of the one-time code sent during password recovery.
pub const OTP_LENGTH: usize = 4;

/// Seconds before a recovery code may be resent.
pub const OTP_RESEND_COOLDOWN_SECS: i64 = 60;

/// Wrong recovery codes allowed before the reset is dropped.
pub const MAX_OTP_ATTEMPTS: u32 = 5;
