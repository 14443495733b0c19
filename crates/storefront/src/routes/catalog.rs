//! Catalog route handlers.
//!
//! The catalog page lists products with category filter controls. Filter
//! clicks swap only the catalog section (HTMX).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use corner_shop_core::CategoryFilter;
use serde::Deserialize;
use tracing::instrument;

use crate::shop::load_products;
use crate::state::AppState;
use crate::view::{CartBadge, FilterBar, ProductGrid, ViewTargets};

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogPageTemplate {
    pub grid: ProductGrid,
    pub filters: FilterBar,
    pub badge: CartBadge,
}

impl From<ViewTargets> for CatalogPageTemplate {
    fn from(targets: ViewTargets) -> Self {
        Self {
            grid: targets.product_grid.unwrap_or_default(),
            filters: targets.filters.unwrap_or_default(),
            badge: targets.cart_badge.unwrap_or_default(),
        }
    }
}

/// Catalog section fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog.html")]
pub struct CatalogSectionTemplate {
    pub grid: ProductGrid,
    pub filters: FilterBar,
}

impl From<ViewTargets> for CatalogSectionTemplate {
    fn from(targets: ViewTargets) -> Self {
        Self {
            grid: targets.product_grid.unwrap_or_default(),
            filters: targets.filters.unwrap_or_default(),
        }
    }
}

/// Display the catalog page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> impl IntoResponse {
    let filter = CategoryFilter::from(query.category);
    let mut targets = ViewTargets::catalog_page();

    state.shop().lock().await.render_page(&filter, &mut targets);

    CatalogPageTemplate::from(targets)
}

/// Filter the catalog section (HTMX).
#[instrument(skip(state))]
pub async fn section(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> impl IntoResponse {
    let filter = CategoryFilter::from(query.category);
    let mut targets = ViewTargets::catalog_section();

    state
        .shop()
        .lock()
        .await
        .filter_by_category(&filter, &mut targets);

    CatalogSectionTemplate::from(targets)
}

/// Re-fetch the catalog and return the refreshed section (HTMX).
///
/// When the fetch fails nothing is swapped: the response is
/// `204 No Content` and the page keeps showing what it had.
#[instrument(skip(state))]
pub async fn refresh(State(state): State<AppState>) -> Response {
    let mut targets = ViewTargets::catalog_section();

    if load_products(state.catalog(), state.shop(), &mut targets).await {
        CatalogSectionTemplate::from(targets).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
