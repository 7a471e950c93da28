//! # Domain Types
//!
//! Core domain types shared by the storefront and its frontend.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Principal     │   │    Product      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  email          │   │  name, price    │   │  product_id     │       │
//! │  │  full_name      │   │  category       │   │  status, date   │       │
//! │  │  role           │   │  rating/reviews │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   UserRole      │   │  OrderStatus    │   │  VendorOrder    │       │
//! │  │  Customer       │   │  OnTransit      │   │  + VendorOrder- │       │
//! │  │  Vendor         │   │  Arrived        │   │    Status       │       │
//! │  └─────────────────┘   │  Canceled       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serde casing follows the literals the frontend already uses
//! (`"on-transit"`, `"vendor"`, `fullName`).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// User Role
// =============================================================================

/// Which half of the app a user lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Browses, buys and tracks orders.
    #[default]
    Customer,
    /// Manages listings and incoming orders.
    Vendor,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Vendor => "vendor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "vendor" => Ok(UserRole::Vendor),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["customer".to_string(), "vendor".to_string()],
            }),
        }
    }
}

// =============================================================================
// Principal
// =============================================================================

/// The authenticated user as held in the session.
///
/// There is no password field: credentials live only inside
/// [`crate::session::UserDirectory`], so a `Principal` can be handed to any
/// screen or serialized without leaking them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

impl Principal {
    #[inline]
    pub fn is_vendor(&self) -> bool {
        self.role == UserRole::Vendor
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the customer catalog. Immutable once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price, never negative.
    pub price: Money,
    /// Display name of the category ("Herbs", "Teas", ...).
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Average rating out of 5.
    pub rating: f32,
    pub reviews: u32,
}

/// A browse filter chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Customer Orders
// =============================================================================

/// Delivery state of a customer order; one tab per variant on the orders screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    OnTransit,
    Arrived,
    Canceled,
}

impl OrderStatus {
    /// All statuses in tab order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::OnTransit,
        OrderStatus::Arrived,
        OrderStatus::Canceled,
    ];

    /// Human-readable label for the status tag.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::OnTransit => "On Transit",
            OrderStatus::Arrived => "Arrived",
            OrderStatus::Canceled => "Canceled",
        }
    }
}

/// A customer order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub quantity: i64,
}

// =============================================================================
// Vendor Orders & Listings
// =============================================================================

/// Fulfilment state of an order as the vendor sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VendorOrderStatus {
    Pending,
    Shipped,
    Delivered,
}

/// An incoming order on the vendor dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VendorOrder {
    pub id: String,
    pub customer: String,
    pub product: String,
    pub price: Money,
    pub status: VendorOrderStatus,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub image: String,
}

/// A product a vendor offers. Editable, unlike [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VendorListing {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_frontend_literal() {
        assert_eq!("vendor".parse::<UserRole>().unwrap(), UserRole::Vendor);
        assert_eq!(UserRole::Customer.to_string(), "customer");
        assert!("admin".parse::<UserRole>().is_err());
        assert_eq!(UserRole::default(), UserRole::Customer);
    }

    #[test]
    fn test_order_status_serializes_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OnTransit).unwrap();
        assert_eq!(json, r#""on-transit""#);
        assert_eq!(OrderStatus::Canceled.label(), "Canceled");
    }

    #[test]
    fn test_principal_serializes_camel_case_without_password() {
        let principal = Principal {
            id: "1".to_string(),
            email: "customer@example.com".to_string(),
            full_name: "Mark Jonathan".to_string(),
            role: UserRole::Customer,
        };
        let json = serde_json::to_value(&principal).unwrap();
        assert_eq!(json["fullName"], "Mark Jonathan");
        assert_eq!(json["role"], "customer");
        assert!(json.get("password").is_none());
        assert!(!principal.is_vendor());
    }
}
