//! Shopping cart state and persistence.
//!
//! The cart is an ordered list of lines, one per product. Lines keep copies
//! of the product title, price and image taken when the product was first
//! added; later catalog reloads never touch them.
//!
//! [`CartStore`] writes the whole cart to [`LocalStorage`] under
//! [`keys::CART`] after every mutation.

use std::sync::Arc;

use corner_shop_core::{Price, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::storage::{LocalStorage, StorageError, keys};

/// Flat shipping surcharge applied to any non-empty cart.
pub const SHIPPING_FLAT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub id: ProductId,
    /// Title at the time the product was added.
    pub title: String,
    /// Unit price at the time the product was added.
    pub price: Price,
    /// Image URL at the time the product was added.
    pub image: String,
    /// Number of units, always at least one for lines created here.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartLine {
    /// Start a new line for `product` with a quantity of one.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added,
    /// An existing line's quantity changed.
    Updated,
    /// A line was removed because its quantity reached zero.
    Removed,
    /// The id was unknown; nothing changed.
    Ignored,
}

impl CartChange {
    /// Whether the cart was mutated.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Money summary of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of price × quantity over all lines.
    pub subtotal: Decimal,
    /// Shipping surcharge, zero for an empty cart.
    pub shipping: Decimal,
    /// Subtotal plus shipping.
    pub total: Decimal,
}

/// Ordered cart lines, at most one per product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Compute subtotal, shipping and total.
    ///
    /// Sums saturate at the `Decimal` range instead of overflowing.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal = self
            .lines
            .iter()
            .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.line_total()));
        let shipping = if self.is_empty() {
            Decimal::ZERO
        } else {
            SHIPPING_FLAT_RATE
        };

        CartTotals {
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
        }
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) -> CartChange {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            CartChange::Updated
        } else {
            self.lines.push(CartLine::snapshot(product));
            CartChange::Added
        }
    }

    /// Apply `delta` to the quantity of the line for `id`.
    ///
    /// A line whose quantity would drop to zero or below is removed.
    pub fn change_quantity(&mut self, id: ProductId, delta: i32) -> CartChange {
        let Some(position) = self.lines.iter().position(|line| line.id == id) else {
            return CartChange::Ignored;
        };

        let Some(line) = self.lines.get_mut(position) else {
            return CartChange::Ignored;
        };

        let next = i64::from(line.quantity) + i64::from(delta);
        if next <= 0 {
            self.lines.remove(position);
            CartChange::Removed
        } else {
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            CartChange::Updated
        }
    }
}

/// The cart together with the storage it is mirrored to.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn LocalStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the cart from `storage`.
    ///
    /// A missing, unreadable or unparseable value yields an empty cart.
    #[must_use]
    pub fn load(storage: Arc<dyn LocalStorage>) -> Self {
        let cart = match storage.get_item(keys::CART) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored cart is unparseable, starting empty");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored cart, starting empty");
                Cart::new()
            }
        };

        tracing::debug!(lines = cart.lines().len(), "Cart loaded");
        Self { cart, storage }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of catalog product `id`.
    ///
    /// Unknown ids are ignored and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails. The in-memory change is kept.
    pub fn add_to_cart(
        &mut self,
        catalog: &Catalog,
        id: ProductId,
    ) -> Result<CartChange, StorageError> {
        let Some(product) = catalog.find(id) else {
            return Ok(CartChange::Ignored);
        };

        let change = self.cart.add(product);
        self.save()?;
        Ok(change)
    }

    /// Change the quantity of the line for `id` by `delta`.
    ///
    /// Unknown ids are ignored and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails. The in-memory change is kept.
    pub fn change_quantity(
        &mut self,
        id: ProductId,
        delta: i32,
    ) -> Result<CartChange, StorageError> {
        let change = self.cart.change_quantity(id, delta);
        if change.is_mutation() {
            self.save()?;
        }
        Ok(change)
    }

    /// Write the whole cart to storage, replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub fn save(&self) -> Result<(), StorageError> {
        let body = serde_json::to_string(&self.cart)?;
        self.storage.set_item(keys::CART, &body)
    }
}
