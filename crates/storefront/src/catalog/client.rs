//! HTTP client for the remote catalog API.

use corner_shop_core::Product;
use thiserror::Error;
use tracing::instrument;

use crate::config::CatalogConfig;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body is not a list of products.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the catalog API.
///
/// Requests carry no timeout; a request that never answers never resolves.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.api_url.to_string(),
        }
    }

    /// URL the product list is fetched from.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails, the API answers with a
    /// non-success status, or the body is not a JSON array of products.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(
                body = %body.chars().take(500).collect::<String>(),
                "Catalog response did not parse"
            );
            e
        })?;

        tracing::debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }
}
