//! # Catalog Commands
//!
//! Read-only product queries for the home, browse and detail screens.

use greencart_core::{Category, Product};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Gets the category chips, "All" first.
pub fn list_categories(catalog: &CatalogState) -> Vec<Category> {
    debug!("list_categories command");
    catalog.catalog().categories().to_vec()
}

/// Lists products for a category chip.
///
/// ## Arguments
/// * `category` - Category id; `None` or `"all"` lists everything
pub fn list_products(catalog: &CatalogState, category: Option<&str>) -> Vec<Product> {
    debug!(category = ?category, "list_products command");

    match category {
        Some(id) => catalog.catalog().by_category(id).into_iter().cloned().collect(),
        None => catalog.catalog().products().to_vec(),
    }
}

/// Searches product names and descriptions. An empty query lists everything.
///
/// ## Errors
/// - `VALIDATION_ERROR` if the query is too long
pub fn search_products(catalog: &CatalogState, query: &str) -> Result<Vec<Product>, ApiError> {
    debug!(query = %query, "search_products command");

    let found = catalog.catalog().search(query)?;
    Ok(found.into_iter().cloned().collect())
}

/// Gets one product for the detail screen.
pub fn get_product(catalog: &CatalogState, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");

    catalog
        .catalog()
        .find(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;

    #[test]
    fn test_categories_start_with_all() {
        let app = test_support::app();
        let categories = list_categories(&app.catalog);
        assert_eq!(categories[0].id, "all");
        assert_eq!(categories.len(), 4);
    }

    #[test]
    fn test_list_by_category() {
        let app = test_support::app();
        assert_eq!(list_products(&app.catalog, None).len(), 6);
        assert_eq!(list_products(&app.catalog, Some("all")).len(), 6);

        let teas = list_products(&app.catalog, Some("teas"));
        assert_eq!(teas.len(), 2);
        assert!(teas.iter().all(|p| p.category == "Teas"));

        assert!(list_products(&app.catalog, Some("seeds")).is_empty());
    }

    #[test]
    fn test_search() {
        let app = test_support::app();
        let hits = search_products(&app.catalog, "immune").unwrap();
        let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(search_products(&app.catalog, "  ").unwrap().len(), 6);
        assert!(search_products(&app.catalog, "cactus").unwrap().is_empty());
    }

    #[test]
    fn test_get_product() {
        let app = test_support::app();
        assert_eq!(get_product(&app.catalog, "4").unwrap().name, "Lavender Bundle");
        assert_eq!(
            get_product(&app.catalog, "99").unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
