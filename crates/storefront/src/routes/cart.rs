//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in durable local storage; every mutation is written
//! through before the response is rendered.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use corner_shop_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;
use crate::view::{CartBadge, CartPanel, ViewTargets};

/// HTMX event fired after any cart mutation.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Change quantity form data.
#[derive(Debug, Deserialize)]
pub struct ChangeQuantityForm {
    pub product_id: ProductId,
    pub delta: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartPanel,
    pub badge: CartBadge,
}

impl From<ViewTargets> for CartShowTemplate {
    fn from(targets: ViewTargets) -> Self {
        Self {
            cart: targets.cart.unwrap_or_default(),
            badge: targets.cart_badge.unwrap_or_default(),
        }
    }
}

/// Cart panel fragment template with out-of-band badge (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_update.html")]
pub struct CartUpdateTemplate {
    pub cart: CartPanel,
    pub badge: CartBadge,
}

impl From<ViewTargets> for CartUpdateTemplate {
    fn from(targets: ViewTargets) -> Self {
        Self {
            cart: targets.cart.unwrap_or_default(),
            badge: targets.cart_badge.unwrap_or_default(),
        }
    }
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: CartBadge,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let mut targets = ViewTargets::cart_page();

    state.shop().lock().await.render_cart(&mut targets);

    CartShowTemplate::from(targets)
}

/// Add item to cart (HTMX).
///
/// Unknown products are ignored. Returns the cart count badge with an HTMX
/// trigger so other cart views can refresh.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let mut targets = ViewTargets::badge();

    let change = state
        .shop()
        .lock()
        .await
        .add_to_cart(form.product_id, &mut targets)?;

    if change.is_mutation() {
        let product_id = form.product_id.to_string();
        add_breadcrumb(
            "cart",
            "Added product to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
    } else {
        tracing::debug!(product_id = %form.product_id, "Ignoring add for unknown product");
    }

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartCountTemplate {
            badge: targets.cart_badge.unwrap_or_default(),
        },
    )
        .into_response())
}

/// Change a line's quantity (HTMX).
///
/// Returns the re-rendered cart panel plus an out-of-band badge update.
#[instrument(skip(state))]
pub async fn change_quantity(
    State(state): State<AppState>,
    Form(form): Form<ChangeQuantityForm>,
) -> Result<Response> {
    let mut targets = ViewTargets::cart_page();

    let change = state.shop().lock().await.change_quantity(
        form.product_id,
        form.delta,
        &mut targets,
    )?;

    if change.is_mutation() {
        let product_id = form.product_id.to_string();
        let delta = form.delta.to_string();
        add_breadcrumb(
            "cart",
            "Changed cart quantity",
            Some(&[("product_id", product_id.as_str()), ("delta", delta.as_str())]),
        );
    }

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartUpdateTemplate::from(targets),
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let mut targets = ViewTargets::badge();

    state.shop().lock().await.render_cart(&mut targets);

    CartCountTemplate {
        badge: targets.cart_badge.unwrap_or_default(),
    }
}
