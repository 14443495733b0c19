//! View targets and the render functions that fill them.
//!
//! A page (or HTMX fragment) declares which targets it contains by setting
//! them to `Some`. Every render function checks its target first and does
//! nothing when the target is `None`, so one operation can run against any
//! page.

use corner_shop_core::{ALL_CATEGORIES, CategoryFilter, Product, ProductId, format_amount};
use rust_decimal::Decimal;

use crate::cart::{Cart, CartLine};
use crate::text::{truncate_desc, truncate_title};

/// Product card display data for templates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub rating: Option<String>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: truncate_desc(&product.description),
            price: product.price.display(),
            image: product.image.clone(),
            category: product.category.clone(),
            rating: product
                .rating
                .map(|rating| format!("{:.1} ({})", rating.rate, rating.count)),
        }
    }
}

/// Product grid container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductGrid {
    pub cards: Vec<ProductCard>,
}

/// One category filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Value sent back when the control is clicked.
    pub value: String,
    /// Button label.
    pub label: String,
    /// Whether this control is the current selection.
    pub active: bool,
}

/// Category filter control set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterBar {
    pub options: Vec<FilterOption>,
}

impl FilterBar {
    /// The active control, if any.
    #[must_use]
    pub fn active(&self) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.active)
    }
}

/// Cart item count badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartBadge {
    pub count: u32,
}

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub quantity: u32,
    pub image: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            title: truncate_title(&line.title),
            price: line.price.display(),
            quantity: line.quantity,
            image: line.image.clone(),
        }
    }
}

/// Cart list, empty indicator and summary containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanel {
    /// Show the "cart is empty" indicator (and hide the cart box).
    pub show_empty: bool,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl Default for CartPanel {
    fn default() -> Self {
        Self {
            show_empty: true,
            lines: Vec::new(),
            subtotal: format_amount(Decimal::ZERO),
            shipping: format_amount(Decimal::ZERO),
            total: format_amount(Decimal::ZERO),
        }
    }
}

/// The optional view targets of the current page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewTargets {
    pub product_grid: Option<ProductGrid>,
    pub filters: Option<FilterBar>,
    pub cart_badge: Option<CartBadge>,
    pub cart: Option<CartPanel>,
}

impl ViewTargets {
    /// Targets of the catalog page: filters, grid and badge.
    #[must_use]
    pub fn catalog_page() -> Self {
        Self {
            product_grid: Some(ProductGrid::default()),
            filters: Some(FilterBar::default()),
            cart_badge: Some(CartBadge::default()),
            cart: None,
        }
    }

    /// Targets of the catalog fragment: filters and grid.
    #[must_use]
    pub fn catalog_section() -> Self {
        Self {
            product_grid: Some(ProductGrid::default()),
            filters: Some(FilterBar::default()),
            ..Self::default()
        }
    }

    /// Targets of the cart page: badge and cart panel.
    #[must_use]
    pub fn cart_page() -> Self {
        Self {
            cart_badge: Some(CartBadge::default()),
            cart: Some(CartPanel::default()),
            ..Self::default()
        }
    }

    /// Only the cart badge.
    #[must_use]
    pub fn badge() -> Self {
        Self {
            cart_badge: Some(CartBadge::default()),
            ..Self::default()
        }
    }
}

/// Fill the product grid with `products`.
pub fn render_products<'a>(
    targets: &mut ViewTargets,
    products: impl IntoIterator<Item = &'a Product>,
) {
    let Some(grid) = targets.product_grid.as_mut() else {
        return;
    };
    grid.cards = products.into_iter().map(ProductCard::from).collect();
}

/// Fill the filter bar and mark the control for `selected` as active.
///
/// At most one control is active; a category not in `categories` leaves
/// every control inactive.
pub fn render_filters(targets: &mut ViewTargets, categories: &[&str], selected: &CategoryFilter) {
    let Some(bar) = targets.filters.as_mut() else {
        return;
    };

    let all = FilterOption {
        value: ALL_CATEGORIES.to_string(),
        label: "All".to_string(),
        active: *selected == CategoryFilter::All,
    };

    bar.options = std::iter::once(all)
        .chain(categories.iter().map(|category| FilterOption {
            value: (*category).to_string(),
            label: (*category).to_string(),
            active: matches!(selected, CategoryFilter::Only(label) if label == category),
        }))
        .collect();
}

/// Update the badge with the number of units in the cart.
pub fn update_cart_count(targets: &mut ViewTargets, cart: &Cart) {
    if let Some(badge) = targets.cart_badge.as_mut() {
        badge.count = cart.item_count();
    }
}

/// Fill the cart panel: lines, empty indicator and money summary.
pub fn render_cart_page(targets: &mut ViewTargets, cart: &Cart) {
    let Some(panel) = targets.cart.as_mut() else {
        return;
    };

    let totals = cart.totals();
    *panel = CartPanel {
        show_empty: cart.is_empty(),
        lines: cart.lines().iter().map(CartLineView::from).collect(),
        subtotal: format_amount(totals.subtotal),
        shipping: format_amount(totals.shipping),
        total: format_amount(totals.total),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{sample_catalog, sample_product};
    use corner_shop_core::Price;

    fn cart_with(lines: &[(i32, i64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, cents, quantity) in lines {
            let mut product = sample_product(id, "electronics");
            product.price = Price::from_cents(cents);
            product.title = "Wireless Bluetooth Headphones".to_string();
            cart.add(&product);
            cart.change_quantity(product.id, i32::try_from(quantity).unwrap_or(1) - 1);
        }
        cart
    }

    #[test]
    fn test_render_cart_page_totals() {
        let cart = cart_with(&[(1, 1050, 2), (2, 500, 1)]);
        let mut targets = ViewTargets::cart_page();

        render_cart_page(&mut targets, &cart);

        let panel = targets.cart.expect("cart target present");
        assert!(!panel.show_empty);
        assert_eq!(panel.subtotal, "26.00");
        assert_eq!(panel.shipping, "30.00");
        assert_eq!(panel.total, "56.00");
        assert_eq!(panel.lines.len(), 2);
        assert_eq!(panel.lines[0].title, "Wireless ...");
        assert_eq!(panel.lines[0].price, "10.50");
        assert_eq!(panel.lines[0].quantity, 2);
    }

    #[test]
    fn test_render_cart_page_empty() {
        let mut targets = ViewTargets::cart_page();

        render_cart_page(&mut targets, &Cart::new());

        let panel = targets.cart.expect("cart target present");
        assert!(panel.show_empty);
        assert!(panel.lines.is_empty());
        assert_eq!(panel.total, "0.00");
    }

    #[test]
    fn test_render_cart_page_without_target_is_noop() {
        let mut targets = ViewTargets::catalog_page();
        let before = targets.clone();

        render_cart_page(&mut targets, &cart_with(&[(1, 100, 1)]));

        assert_eq!(targets, before);
    }

    #[test]
    fn test_update_cart_count_sums_quantities() {
        let mut targets = ViewTargets::badge();
        update_cart_count(&mut targets, &cart_with(&[(1, 100, 3), (2, 100, 2)]));
        assert_eq!(targets.cart_badge, Some(CartBadge { count: 5 }));
    }

    #[test]
    fn test_render_products_without_grid_is_noop() {
        let mut targets = ViewTargets::cart_page();
        render_products(&mut targets, sample_catalog().products());
        assert!(targets.product_grid.is_none());
    }

    #[test]
    fn test_product_card_truncates_description() {
        let mut product = sample_product(7, "jewelery");
        product.description = "d".repeat(150);

        let card = ProductCard::from(&product);

        assert_eq!(card.description.len(), 123);
        assert_eq!(card.price, "7.99");
    }

    #[test]
    fn test_render_filters_marks_single_active() {
        let catalog = sample_catalog();
        let mut targets = ViewTargets::catalog_section();

        render_filters(
            &mut targets,
            &catalog.categories(),
            &CategoryFilter::from("electronics"),
        );

        let bar = targets.filters.expect("filter target present");
        assert_eq!(bar.options.len(), 4);
        assert_eq!(bar.options.iter().filter(|o| o.active).count(), 1);
        assert_eq!(bar.active().map(|o| o.value.as_str()), Some("electronics"));
    }

    #[test]
    fn test_render_filters_all_is_active_by_default() {
        let mut targets = ViewTargets::catalog_section();
        render_filters(&mut targets, &["jewelery"], &CategoryFilter::All);
        let bar = targets.filters.expect("filter target present");
        assert_eq!(bar.active().map(|o| o.label.as_str()), Some("All"));
    }
}
