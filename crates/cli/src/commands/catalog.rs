//! Catalog inspection commands.
//!
//! # Usage
//!
//! ```bash
//! festify-cli catalog check --path catalog.json
//! festify-cli catalog list
//! ```

use std::path::Path;

use festify_core::{Catalog, Product};
use festify_storefront::catalog::{CatalogLoadError, load_catalog};

/// Validate a catalog: readable, well-formed, unique ids, non-negative prices.
///
/// # Errors
///
/// Returns the load error if the catalog is invalid.
pub fn check(path: Option<&Path>) -> Result<(), CatalogLoadError> {
    let catalog = load_catalog(path)?;
    let source = path.map_or_else(|| "bundled catalog".to_string(), |p| p.display().to_string());

    if catalog.is_empty() {
        tracing::warn!("{source} is valid but has no products");
    } else {
        tracing::info!("{source} is valid ({} products)", catalog.len());
    }
    Ok(())
}

/// Print every product in catalog order.
///
/// # Errors
///
/// Returns the load error if the catalog is invalid.
pub fn list(path: Option<&Path>) -> Result<(), CatalogLoadError> {
    let catalog = load_catalog(path)?;
    for product in catalog.products() {
        tracing::info!("{}", product_line(product));
    }
    Ok(())
}

/// One listing row: id, name, brand and price.
fn product_line(product: &Product) -> String {
    format!(
        "{:>4}  {:<24} {:<20} {:>8}",
        product.id.as_i32(),
        product.name,
        product.brand,
        product.price.to_string()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use festify_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_product_line() {
        let product = Product {
            id: ProductId::new(2),
            name: "Holi Colors Pack".to_string(),
            brand: "Rang Utsav".to_string(),
            price: Price::from_rupees(249),
            image: String::new(),
        };

        let line = product_line(&product);
        assert!(line.starts_with("   2  Holi Colors Pack"));
        assert!(line.ends_with("₹249"));
    }

    #[test]
    fn test_check_bundled_catalog() {
        assert!(check(None).is_ok());
    }

    #[test]
    fn test_check_missing_file() {
        assert!(check(Some(Path::new("/nonexistent/catalog.json"))).is_err());
    }
}
