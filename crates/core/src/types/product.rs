//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as returned by the catalog API.
///
/// Products are read-only for the whole session. Unknown fields in the API
/// payload are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Full product title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Category label (e.g., "electronics").
    pub category: String,
    /// Customer rating, when the API provides one.
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 3.9).
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}
