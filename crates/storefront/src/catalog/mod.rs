//! Product catalog for the current session.
//!
//! # Architecture
//!
//! - The remote catalog API is the source of truth; products are fetched
//!   once at startup by [`CatalogClient`] and kept in memory
//! - [`Catalog`] is read-only between loads; filtering never mutates it
//! - A failed fetch leaves whatever list was already loaded

mod client;

pub use client::{CatalogClient, CatalogError};

use corner_shop_core::{CategoryFilter, Product, ProductId};

/// The session's product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap a fetched product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in API order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns `true` if no products are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products passing `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(&product.category))
            .collect()
    }

    /// Distinct category labels in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }
}
