//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::shop::Shop;
use crate::storage::LocalStorage;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The shop itself is guarded
/// by one mutex so cart and catalog events never interleave.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    shop: Mutex<Shop>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the cart from `storage`. The catalog starts empty; call
    /// [`crate::shop::load_products`] to fill it.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `storage` - Durable storage holding the cart
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Arc<dyn LocalStorage>) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let shop = Shop::open(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the session state.
    #[must_use]
    pub fn shop(&self) -> &Mutex<Shop> {
        &self.inner.shop
    }
}
