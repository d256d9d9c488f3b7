//! Cart engine: line items, totals, and change notification.
//!
//! The engine is UI-agnostic. It owns the mutable cart state and publishes
//! a [`CartEvent`] to registered observers after every state change; the
//! presentation layer subscribes and re-renders the badge, dropdown preview,
//! or cart page as needed. The engine never reaches into a view.

use std::rc::Rc;

use rust_decimal::Decimal;
use serde::Serialize;

use aeromerge_core::{Currency, Price, ProductId, Size};

use crate::catalog::CatalogStore;

/// A cart row, keyed by `(product_id, size)`.
///
/// Name, price, and image are snapshots taken at add time; later catalog
/// changes (none exist in this design) would not retroactively reprice a
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub size: Size,
    /// Always >= 1; a request to set 0 or less removes the line instead.
    pub quantity: u32,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl CartLine {
    /// Price of this line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A cart state change, published to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    LineAdded { product_id: ProductId, size: Size },
    QuantityChanged { product_id: ProductId, size: Size, quantity: u32 },
    LineRemoved { product_id: ProductId, size: Size },
    Cleared,
}

/// Aggregate cart figures published alongside every event.
///
/// Drives the cart-badge indicator without observers re-querying the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: Decimal,
}

/// Observer of cart state changes.
///
/// Observers are `Rc`-shared within the single-threaded session and use
/// interior mutability if they record state.
pub trait CartObserver {
    fn cart_changed(&self, event: &CartEvent, summary: &CartSummary);
}

/// Owns the mutable cart state and derives totals.
pub struct CartEngine {
    catalog: CatalogStore,
    lines: Vec<CartLine>,
    observers: Vec<Rc<dyn CartObserver>>,
}

impl CartEngine {
    /// Create an empty cart backed by the given catalog.
    #[must_use]
    pub fn new(catalog: CatalogStore) -> Self {
        Self {
            catalog,
            lines: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for cart change events.
    pub fn subscribe(&mut self, observer: Rc<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` units of a product in a size.
    ///
    /// A quantity of 0 is clamped to 1; the engine guarantees the positive
    /// quantity invariant rather than trusting caller discipline. If a line
    /// with the same `(product_id, size)` key exists its quantity is
    /// incremented, otherwise a new line snapshots the product's current
    /// name, price, and image. An unknown product id is a silent no-op.
    ///
    /// Returns `true` if the cart changed.
    pub fn add_line(&mut self, product_id: ProductId, quantity: u32, size: Size) -> bool {
        let Some(product) = self.catalog.find(product_id) else {
            tracing::debug!(%product_id, "add_line ignored: unknown product");
            return false;
        };

        let quantity = quantity.max(1);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.size == size)
        {
            line.quantity += quantity;
            let quantity = line.quantity;
            self.publish(CartEvent::QuantityChanged {
                product_id,
                size,
                quantity,
            });
        } else {
            self.lines.push(CartLine {
                product_id,
                size,
                quantity,
                name: product.name.clone(),
                price: product.price,
                image: product.image.clone(),
            });
            self.publish(CartEvent::LineAdded { product_id, size });
        }

        true
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// A value of 0 or less removes the line entirely; the removed line is
    /// returned in that case. Unknown keys are a silent no-op.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        size: Size,
        quantity: i32,
    ) -> Option<CartLine> {
        if quantity <= 0 {
            return self.remove_line(product_id, size);
        }

        let quantity = u32::try_from(quantity).unwrap_or(1);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.size == size)
        {
            line.quantity = quantity;
            self.publish(CartEvent::QuantityChanged {
                product_id,
                size,
                quantity,
            });
        }
        None
    }

    /// Remove a line. Returns the removed line, or `None` if no line matched.
    pub fn remove_line(&mut self, product_id: ProductId, size: Size) -> Option<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id && l.size == size)?;
        let removed = self.lines.remove(index);
        self.publish(CartEvent::LineRemoved { product_id, size });
        Some(removed)
    }

    /// Empty the cart. Publishes nothing when already empty.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.lines.clear();
        self.publish(CartEvent::Cleared);
    }

    /// Sum of price x quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.line_total().amount)
            .sum()
    }

    /// Order total. Shipping is always free in this design, so the total
    /// equals the subtotal.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal()
    }

    /// Sum of quantities across all lines (cart-badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Currency of the cart, taken from the first line (single-currency
    /// catalog), or the default when empty.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.lines
            .first()
            .map_or_else(Currency::default, |l| l.price.currency)
    }

    fn publish(&self, event: CartEvent) {
        let summary = CartSummary {
            item_count: self.item_count(),
            subtotal: self.subtotal(),
        };
        tracing::debug!(
            ?event,
            item_count = summary.item_count,
            subtotal = %summary.subtotal,
            "cart changed"
        );
        for observer in &self.observers {
            observer.cart_changed(&event, &summary);
        }
    }
}
