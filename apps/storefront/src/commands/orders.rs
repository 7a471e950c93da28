//! # Order Commands
//!
//! The customer's order history tabs and the vendor's incoming orders.

use greencart_core::catalog::OrderView;
use greencart_core::{OrderStatus, VendorOrder};
use tracing::debug;

use super::{require_principal, require_vendor};
use crate::error::ApiError;
use crate::state::{CatalogState, OrderState, SessionState};

/// Lists orders in one status tab ("On Transit", "Arrived", "Canceled").
///
/// ## Errors
/// - `UNAUTHENTICATED` without a signed-in user
pub fn list_orders(
    session: &SessionState,
    catalog: &CatalogState,
    orders: &OrderState,
    status: OrderStatus,
) -> Result<Vec<OrderView>, ApiError> {
    require_principal(session)?;
    debug!(status = ?status, "list_orders command");

    Ok(orders.with_orders(|o| o.by_status(catalog.catalog(), status)))
}

/// Lists the vendor dashboard's incoming orders.
///
/// ## Errors
/// - `UNAUTHENTICATED` / `FORBIDDEN` unless a vendor is signed in
pub fn list_vendor_orders(
    session: &SessionState,
    catalog: &CatalogState,
) -> Result<Vec<VendorOrder>, ApiError> {
    require_vendor(session)?;
    debug!("list_vendor_orders command");

    Ok(catalog.vendor_orders().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;
    use greencart_core::VendorOrderStatus;

    #[test]
    fn test_orders_per_tab() {
        let app = test_support::customer();
        for status in OrderStatus::ALL {
            let views = list_orders(&app.session, &app.catalog, &app.orders, status).unwrap();
            assert_eq!(views.len(), 2);
            assert!(views.iter().all(|v| v.status_label == status.label()));
        }
    }

    #[test]
    fn test_orders_need_sign_in() {
        let app = test_support::app();
        let err =
            list_orders(&app.session, &app.catalog, &app.orders, OrderStatus::Arrived).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn test_vendor_orders() {
        let app = test_support::vendor();
        let orders = list_vendor_orders(&app.session, &app.catalog).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[1].status, VendorOrderStatus::Pending);

        let customer = test_support::customer();
        assert_eq!(
            list_vendor_orders(&customer.session, &customer.catalog)
                .unwrap_err()
                .code,
            ErrorCode::Forbidden
        );
    }
}
