//! Render-ready view models.
//!
//! Pure projections of catalog, cart, and order state into display structs
//! with pre-formatted price strings. The presentation layer renders these
//! without touching domain state.

use serde::Serialize;

use aeromerge_core::{ProductId, Size, format_amount};

use crate::cart::{CartEngine, CartLine};
use crate::catalog::{CatalogStore, Product};
use crate::checkout::{CheckoutFlow, CheckoutStep, Order};

/// Lines shown in the cart dropdown preview before collapsing to "+N more".
const DROPDOWN_PREVIEW_LINES: usize = 3;

/// Product card display data (home and listing grids).
#[derive(Debug, Clone, Serialize)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.display(),
            description: product.description.clone(),
            image: product.image.clone(),
        }
    }
}

/// Home page display data.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub featured: Vec<ProductCardView>,
}

/// Product listing page display data.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub products: Vec<ProductCardView>,
    /// Set when no products match the current filter/search.
    pub is_empty: bool,
}

/// Product detail page display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub long_description: String,
    pub colors: Vec<String>,
    pub sizes: Vec<Size>,
    pub stock: u32,
    pub category: String,
    pub image: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.display(),
            long_description: product.long_description.clone(),
            colors: product.colors.clone(),
            sizes: product.sizes.clone(),
            stock: product.stock,
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub size: Size,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            size: line.size,
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            unit_price: line.price.display(),
            line_total: line.line_total().display(),
        }
    }
}

/// Full cart page display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    pub is_empty: bool,
}

/// Cart dropdown preview: the first few lines plus an overflow count.
#[derive(Debug, Clone, Serialize)]
pub struct CartDropdownView {
    pub items: Vec<DropdownItemView>,
    pub more_count: usize,
    pub is_empty: bool,
}

/// A single dropdown preview row.
#[derive(Debug, Clone, Serialize)]
pub struct DropdownItemView {
    pub name: String,
    pub image: String,
    pub size: Size,
    pub quantity: u32,
}

/// Cart-badge indicator signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartBadge {
    pub count: u32,
    pub visible: bool,
}

/// One "Name (Size 9) x 2 - €299.98" row of an order summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryLineView {
    pub label: String,
    pub amount: String,
}

/// Checkout page display data.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub lines: Vec<SummaryLineView>,
    pub total: String,
    pub processing: bool,
}

/// Thank-you page display data.
#[derive(Debug, Clone, Serialize)]
pub struct ThankYouView {
    pub order_number: String,
    pub lines: Vec<SummaryLineView>,
    pub total: String,
    pub countdown_seconds: u32,
}

/// The active page's view model.
#[derive(Debug, Clone, Serialize)]
pub enum PageView {
    Home(HomeView),
    Products(ListingView),
    /// `None` when no product is in focus.
    ProductDetail(Option<ProductDetailView>),
    Cart(CartView),
    Checkout(CheckoutView),
    /// `None` when the page is shown without a finalized order.
    ThankYou(Option<ThankYouView>),
}

/// Project the featured products for the home page.
#[must_use]
pub fn home_view(catalog: &CatalogStore) -> HomeView {
    HomeView {
        featured: catalog.featured().iter().map(ProductCardView::from).collect(),
    }
}

/// Project the current filtered/sorted listing.
#[must_use]
pub fn listing_view(products: &[Product]) -> ListingView {
    ListingView {
        products: products.iter().map(ProductCardView::from).collect(),
        is_empty: products.is_empty(),
    }
}

/// Project the full cart page.
#[must_use]
pub fn cart_view(cart: &CartEngine) -> CartView {
    let currency = cart.currency();
    CartView {
        items: cart.lines().iter().map(CartItemView::from).collect(),
        subtotal: format_amount(cart.subtotal(), currency),
        total: format_amount(cart.total(), currency),
        is_empty: cart.is_empty(),
    }
}

/// Project the cart dropdown preview.
#[must_use]
pub fn dropdown_view(cart: &CartEngine) -> CartDropdownView {
    let items: Vec<DropdownItemView> = cart
        .lines()
        .iter()
        .take(DROPDOWN_PREVIEW_LINES)
        .map(|line| DropdownItemView {
            name: line.name.clone(),
            image: line.image.clone(),
            size: line.size,
            quantity: line.quantity,
        })
        .collect();

    CartDropdownView {
        more_count: cart.lines().len().saturating_sub(items.len()),
        is_empty: cart.is_empty(),
        items,
    }
}

/// Project the cart-badge indicator.
#[must_use]
pub fn cart_badge(cart: &CartEngine) -> CartBadge {
    let count = cart.item_count();
    CartBadge {
        count,
        visible: count > 0,
    }
}

fn summary_lines(lines: &[CartLine]) -> Vec<SummaryLineView> {
    lines
        .iter()
        .map(|line| SummaryLineView {
            label: format!("{} (Size {}) × {}", line.name, line.size, line.quantity),
            amount: line.line_total().display(),
        })
        .collect()
}

/// Project the checkout page (step indicator plus order summary).
#[must_use]
pub fn checkout_view(cart: &CartEngine, flow: &CheckoutFlow) -> CheckoutView {
    CheckoutView {
        step: flow.step(),
        lines: summary_lines(cart.lines()),
        total: format_amount(cart.total(), cart.currency()),
        processing: flow.is_processing(),
    }
}

/// Project the thank-you page for a finalized order.
#[must_use]
pub fn thank_you_view(order: &Order, countdown_seconds: u32) -> ThankYouView {
    ThankYouView {
        order_number: order.number.clone(),
        lines: summary_lines(&order.lines),
        total: order.total.display(),
        countdown_seconds,
    }
}
