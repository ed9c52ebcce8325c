//! Products and the read-only catalog they are looked up in.
//!
//! The catalog is supplied from outside the ledger (a bundled JSON file in the
//! storefront, any file in the CLI). The ledger only ever reads from it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// A product on sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    /// Path or URL of the product image.
    pub image: String,
}

/// Errors building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate product id {0} in catalog")]
    DuplicateProduct(ProductId),
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only product lookup.
pub trait Catalog {
    /// All products, in display order.
    fn products(&self) -> &[Product];

    /// Find a product by id.
    fn lookup_product(&self, id: ProductId) -> Option<&Product> {
        self.products().iter().find(|product| product.id == id)
    }
}

/// An in-memory catalog with unique product ids.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Build a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON or negative prices, and
    /// `CatalogError::DuplicateProduct` for repeated ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            brand: "Festify".to_string(),
            price: Price::from_rupees(price),
            image: format!("/static/images/{id}.jpg"),
        }
    }

    #[test]
    fn test_lookup_product() {
        let catalog = StaticCatalog::new(vec![product(1, 199), product(2, 249)]).unwrap();
        assert_eq!(
            catalog.lookup_product(ProductId::new(2)).map(|p| p.price),
            Some(Price::from_rupees(249))
        );
        assert!(catalog.lookup_product(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = StaticCatalog::new(vec![product(1, 199), product(1, 249)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_from_json_keeps_order() {
        let json = r#"[
            {"id": 3, "name": "Christmas Tree", "brand": "Evergreen", "price": 799, "image": "/images/tree.jpg"},
            {"id": 1, "name": "Diwali Diyas", "brand": "Deepam", "price": 199, "image": "/images/diya.jpg"}
        ]"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        let ids: Vec<i32> = catalog.products().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        let json = r#"[{"id": 1, "name": "x", "brand": "y", "price": -1, "image": ""}]"#;
        assert!(matches!(
            StaticCatalog::from_json(json),
            Err(CatalogError::Parse(_))
        ));
    }
}
