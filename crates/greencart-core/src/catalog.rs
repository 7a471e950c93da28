//! # Catalog & Orders
//!
//! Seeded read-only product catalog, the customer order book and the vendor's
//! incoming orders.
//!
//! ## Search
//! ```text
//!   query "tea"
//!      │  trim, ≤ 100 chars, lowercase
//!      ▼
//!   name / description contains "tea"?
//!      │
//!      ▼
//!   [Chamomile Tea, Mint Plant ("great for teas"), Green Tea Blend]
//! ```
//!
//! Results keep catalog order. An empty query returns every product.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartLine;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Category, Order, OrderStatus, Product, VendorOrder, VendorOrderStatus};
use crate::validation::validate_search_query;

/// Category id that matches every product.
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Catalog
// =============================================================================

/// The customer-facing product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Catalog {
            products,
            categories,
        }
    }

    /// The storefront's built-in products and filter chips.
    pub fn seeded() -> Self {
        let product = |id: &str,
                       name: &str,
                       description: &str,
                       cents: i64,
                       category: &str,
                       photo: u32,
                       rating: f32,
                       reviews: u32| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: Money::from_cents(cents),
            category: category.to_string(),
            image: pexels(photo),
            rating,
            reviews,
        };

        let products = vec![
            product(
                "1",
                "Echinacea Plant",
                "A beautiful flowering plant known for its immune-boosting properties. \
                 Perfect for both ornamental and medicinal gardens.",
                1500,
                "Herbs",
                2382325,
                4.5,
                128,
            ),
            product(
                "2",
                "Chamomile Tea",
                "Organic chamomile tea known for its calming properties and sweet, floral taste.",
                1299,
                "Teas",
                1493080,
                4.8,
                256,
            ),
            product(
                "3",
                "Elderberry Tonic",
                "A powerful immune-boosting tonic made from organic elderberries.",
                2499,
                "Tonics",
                1020315,
                4.7,
                89,
            ),
            product(
                "4",
                "Lavender Bundle",
                "Fresh-cut lavender bundle, perfect for aromatherapy and decoration.",
                1850,
                "Herbs",
                6621472,
                4.6,
                167,
            ),
            product(
                "5",
                "Mint Plant",
                "Fresh organic mint plant, great for teas and cooking.",
                999,
                "Herbs",
                2300265,
                4.4,
                143,
            ),
            product(
                "6",
                "Green Tea Blend",
                "Premium green tea blend with antioxidant properties.",
                1499,
                "Teas",
                461428,
                4.9,
                312,
            ),
        ];

        let categories = [
            ("all", "All"),
            ("herbs", "Herbs"),
            ("teas", "Teas"),
            ("tonics", "Tonics"),
        ]
        .into_iter()
        .map(|(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

        Catalog::new(products, categories)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in the given category chip.
    ///
    /// `"all"` returns everything. Other ids match the product's category
    /// name case-insensitively, so `"herbs"` selects `"Herbs"`.
    pub fn by_category(&self, category_id: &str) -> Vec<&Product> {
        if category_id.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category_id))
            .collect()
    }

    /// Case-insensitive substring search over name and description.
    pub fn search(&self, query: &str) -> CoreResult<Vec<&Product>> {
        let needle = validate_search_query(query)?.to_lowercase();
        if needle.is_empty() {
            return Ok(self.products.iter().collect());
        }

        Ok(self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

fn pexels(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg",
        photo
    )
}

// =============================================================================
// Customer Order Book
// =============================================================================

/// An order joined with the product it refers to, as listed on the orders screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order: Order,
    pub product: Product,
    pub status_label: String,
    pub total: Money,
}

/// The signed-in customer's order history.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        OrderBook { orders: Vec::new() }
    }

    /// Sample history: two orders in each status.
    pub fn seeded() -> Self {
        let seed = [
            ("1", "1", (2023, 5, 26), OrderStatus::OnTransit),
            ("2", "2", (2023, 5, 26), OrderStatus::Arrived),
            ("3", "3", (2023, 5, 25), OrderStatus::Canceled),
            ("4", "4", (2023, 5, 25), OrderStatus::OnTransit),
            ("5", "5", (2023, 5, 25), OrderStatus::Arrived),
            ("6", "6", (2023, 5, 24), OrderStatus::Canceled),
        ];

        let orders = seed
            .into_iter()
            .filter_map(|(id, product_id, (y, m, d), status)| {
                Some(Order {
                    id: id.to_string(),
                    product_id: product_id.to_string(),
                    status,
                    date: NaiveDate::from_ymd_opt(y, m, d)?,
                    quantity: 1,
                })
            })
            .collect();

        OrderBook { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders in `status` with their products resolved.
    ///
    /// Orders whose product is not in `catalog` are left out.
    pub fn by_status(&self, catalog: &Catalog, status: OrderStatus) -> Vec<OrderView> {
        self.orders
            .iter()
            .filter(|o| o.status == status)
            .filter_map(|order| {
                let product = catalog.find(&order.product_id)?;
                Some(OrderView {
                    order: order.clone(),
                    product: product.clone(),
                    status_label: status.label().to_string(),
                    total: product.price * order.quantity,
                })
            })
            .collect()
    }

    /// Records one on-transit order per cart line and returns them.
    pub fn place(&mut self, lines: &[CartLine], date: NaiveDate) -> Vec<Order> {
        let placed: Vec<Order> = lines
            .iter()
            .map(|line| Order {
                id: Uuid::new_v4().to_string(),
                product_id: line.product.id.clone(),
                status: OrderStatus::OnTransit,
                date,
                quantity: line.quantity,
            })
            .collect();

        self.orders.extend(placed.iter().cloned());
        placed
    }
}

// =============================================================================
// Vendor Orders
// =============================================================================

/// Sample incoming orders for the vendor dashboard. Read-only.
pub fn seeded_vendor_orders() -> Vec<VendorOrder> {
    let seed = [
        (
            "101",
            "Alice Johnson",
            "Aloe Vera",
            200,
            VendorOrderStatus::Delivered,
            (2024, 6, 1),
            4505161,
        ),
        (
            "102",
            "Bob Smith",
            "Lavender Oil",
            500,
            VendorOrderStatus::Pending,
            (2024, 6, 2),
            6621472,
        ),
        (
            "103",
            "Carol Lee",
            "Chamomile Tea",
            150,
            VendorOrderStatus::Shipped,
            (2024, 6, 3),
            1417945,
        ),
    ];

    seed.into_iter()
        .filter_map(|(id, customer, product, price, status, (y, m, d), photo)| {
            Some(VendorOrder {
                id: id.to_string(),
                customer: customer.to_string(),
                product: product.to_string(),
                price: Money::from_major_minor(price, 0),
                status,
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                image: pexels(photo),
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
