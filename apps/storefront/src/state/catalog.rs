//! # Catalog, Order and Listing State
//!
//! The product catalog and vendor orders are seeded once and never change,
//! so they are shared without a lock. The customer order book and the
//! vendor's listings are mutable and sit behind mutexes.

use std::sync::{Arc, Mutex};

use greencart_core::catalog::{seeded_vendor_orders, Catalog, OrderBook};
use greencart_core::vendor::VendorListings;
use greencart_core::VendorOrder;

use super::lock;

/// Read-only catalog data.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
    vendor_orders: Arc<Vec<VendorOrder>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog, vendor_orders: Vec<VendorOrder>) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
            vendor_orders: Arc::new(vendor_orders),
        }
    }

    pub fn seeded() -> Self {
        CatalogState::new(Catalog::seeded(), seeded_vendor_orders())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn vendor_orders(&self) -> &[VendorOrder] {
        &self.vendor_orders
    }
}

/// The customer order book.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    orders: Arc<Mutex<OrderBook>>,
}

impl OrderState {
    pub fn seeded() -> Self {
        OrderState {
            orders: Arc::new(Mutex::new(OrderBook::seeded())),
        }
    }

    pub fn with_orders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBook) -> R,
    {
        let orders = lock(&self.orders);
        f(&orders)
    }

    pub fn with_orders_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderBook) -> R,
    {
        let mut orders = lock(&self.orders);
        f(&mut orders)
    }
}

/// The vendor's product listings.
#[derive(Debug, Clone, Default)]
pub struct ListingState {
    listings: Arc<Mutex<VendorListings>>,
}

impl ListingState {
    pub fn seeded() -> Self {
        ListingState {
            listings: Arc::new(Mutex::new(VendorListings::seeded())),
        }
    }

    pub fn with_listings<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendorListings) -> R,
    {
        let listings = lock(&self.listings);
        f(&listings)
    }

    pub fn with_listings_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendorListings) -> R,
    {
        let mut listings = lock(&self.listings);
        f(&mut listings)
    }
}
