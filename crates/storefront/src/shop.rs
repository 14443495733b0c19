//! The storefront session: catalog plus cart, owned in one place.
//!
//! Every user event runs one [`Shop`] operation against the page's
//! [`ViewTargets`]. The shop sits behind a single async mutex in
//! [`AppState`](crate::state::AppState), so events are handled one at a
//! time, to completion.

use std::sync::Arc;

use corner_shop_core::{CategoryFilter, Product, ProductId};
use tokio::sync::Mutex;
use tracing::instrument;

use crate::cart::{CartChange, CartStore};
use crate::catalog::{Catalog, CatalogClient};
use crate::storage::{LocalStorage, StorageError};
use crate::view::{self, ViewTargets};

/// Session state: the loaded catalog and the persisted cart.
#[derive(Debug)]
pub struct Shop {
    catalog: Catalog,
    cart: CartStore,
}

impl Shop {
    /// Start a session with an empty catalog and the cart from `storage`.
    #[must_use]
    pub fn open(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            catalog: Catalog::default(),
            cart: CartStore::load(storage),
        }
    }

    /// The session's product list.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Replace the product list. Existing cart lines keep their snapshots.
    pub fn replace_catalog(&mut self, products: Vec<Product>) {
        self.catalog = Catalog::new(products);
    }

    /// Render the grid and filter bar for `filter`.
    ///
    /// Reads only; neither the catalog nor the cart changes.
    pub fn filter_by_category(&self, filter: &CategoryFilter, targets: &mut ViewTargets) {
        view::render_products(targets, self.catalog.filter(filter));
        view::render_filters(targets, &self.catalog.categories(), filter);
    }

    /// Render the badge and cart panel, if the page has them.
    pub fn render_cart(&self, targets: &mut ViewTargets) {
        view::update_cart_count(targets, self.cart.cart());
        view::render_cart_page(targets, self.cart.cart());
    }

    /// Render every target the page has.
    pub fn render_page(&self, filter: &CategoryFilter, targets: &mut ViewTargets) {
        self.filter_by_category(filter, targets);
        self.render_cart(targets);
    }

    /// Add one unit of product `id` and refresh the badge.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    #[instrument(skip(self, targets))]
    pub fn add_to_cart(
        &mut self,
        id: ProductId,
        targets: &mut ViewTargets,
    ) -> Result<CartChange, StorageError> {
        let change = self.cart.add_to_cart(&self.catalog, id);
        view::update_cart_count(targets, self.cart.cart());
        change
    }

    /// Change the quantity of product `id` by `delta`, then refresh the
    /// badge and cart panel.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    #[instrument(skip(self, targets))]
    pub fn change_quantity(
        &mut self,
        id: ProductId,
        delta: i32,
        targets: &mut ViewTargets,
    ) -> Result<CartChange, StorageError> {
        let change = self.cart.change_quantity(id, delta);
        self.render_cart(targets);
        change
    }
}

/// Fetch the catalog and render the page.
///
/// The fetch runs without holding the shop lock. On success the product list
/// is replaced and the grid rendered with every product. On failure the error
/// is logged and the current list is kept. Either way the badge and cart
/// panel are rendered afterwards.
///
/// Returns `true` if the product list was replaced.
#[instrument(skip_all, fields(endpoint = %client.endpoint()))]
pub async fn load_products(
    client: &CatalogClient,
    shop: &Mutex<Shop>,
    targets: &mut ViewTargets,
) -> bool {
    let fetched = client.fetch_products().await;

    let mut shop = shop.lock().await;
    let loaded = match fetched {
        Ok(products) => {
            tracing::info!(count = products.len(), "Catalog loaded");
            shop.replace_catalog(products);
            shop.filter_by_category(&CategoryFilter::All, targets);
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog");
            false
        }
    };

    shop.render_cart(targets);
    loaded
}
