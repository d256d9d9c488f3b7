//! Session state and the inbound event surface.
//!
//! [`StorefrontSession`] owns every piece of mutable state for one page
//! session: catalog, cart, router, checkout flow, notification queue, the
//! current filtered listing, and the ephemeral last order. All state
//! transitions happen on discrete calls into this type - user events from
//! the presentation layer, or elapsed time via [`StorefrontSession::advance`].
//! Each handler runs to completion before the next; there is no parallelism.

use std::rc::Rc;
use std::time::Duration;

use tracing::instrument;

use aeromerge_core::{Price, ProductId, Size};

use crate::cart::{CartEngine, CartObserver};
use crate::catalog::{CatalogError, CatalogStore, Product, SortKey};
use crate::checkout::{
    CheckoutFlow, Order, PaymentDetails, ShippingDetails, generate_order_number,
    random_success_message,
};
use crate::notify::{Notifications, Toast};
use crate::router::{CountdownTick, Page, ViewRouter};
use crate::views::{self, CartBadge, CartDropdownView, PageView};

/// A single in-memory storefront session.
///
/// Created on the home page with an empty cart; discarded on process exit.
/// Nothing persists across sessions by design.
pub struct StorefrontSession {
    catalog: CatalogStore,
    cart: CartEngine,
    router: ViewRouter,
    checkout: CheckoutFlow,
    notifications: Notifications,
    category: Option<String>,
    sort: SortKey,
    listing: Vec<Product>,
    last_order: Option<Order>,
}

impl StorefrontSession {
    /// Create a session over the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog data is malformed.
    pub fn new() -> Result<Self, CatalogError> {
        let catalog = CatalogStore::load()?;
        let listing = catalog.all().to_vec();
        let cart = CartEngine::new(catalog.clone());
        Ok(Self {
            catalog,
            cart,
            router: ViewRouter::new(),
            checkout: CheckoutFlow::new(),
            notifications: Notifications::new(),
            category: None,
            sort: SortKey::default(),
            listing,
            last_order: None,
        })
    }

    /// The read-only catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The cart engine (read access; mutations go through session methods).
    #[must_use]
    pub const fn cart(&self) -> &CartEngine {
        &self.cart
    }

    /// The currently displayed page.
    #[must_use]
    pub const fn current_page(&self) -> Page {
        self.router.current()
    }

    /// Register a cart observer (badge, dropdown, cart-page re-render).
    pub fn subscribe_cart(&mut self, observer: Rc<dyn CartObserver>) {
        self.cart.subscribe(observer);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a page, running its entry hook.
    ///
    /// Checkout is guarded: with an empty cart the transition is blocked and
    /// an error toast is queued instead. Leaving the thank-you page drops
    /// the displayed order and cancels the redirect countdown.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, page: Page) {
        if page == Page::Checkout && self.cart.is_empty() {
            tracing::debug!("checkout blocked: cart is empty");
            self.notifications.error("Your cart is empty");
            return;
        }

        if self.router.current() == Page::ThankYou && page != Page::ThankYou {
            self.last_order = None;
        }

        self.router.enter(page);

        // The listing is recomputed on filter/sort/search change, never on
        // page entry, so an active search survives detail-and-back
        // navigation.
        if page == Page::Checkout {
            self.checkout.reset();
        }
    }

    /// Focus a product and open its detail page. Unknown ids are a silent
    /// no-op.
    pub fn view_product(&mut self, id: ProductId) {
        if self.catalog.find(id).is_none() {
            tracing::debug!(%id, "view_product ignored: unknown product");
            return;
        }
        self.router.focus(id);
        self.navigate(Page::ProductDetail);
    }

    /// "Continue shopping": cancel any pending redirect and go home.
    pub fn continue_shopping(&mut self) {
        self.navigate(Page::Home);
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add a product to the cart and queue a confirmation toast.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: u32, size: Size) {
        let Some(name) = self.catalog.find(id).map(|p| p.name.clone()) else {
            return;
        };
        if self.cart.add_line(id, quantity, size) {
            self.notifications.success(format!("{name} added to cart!"));
        }
    }

    /// Add to cart and jump straight to the cart page.
    pub fn buy_now(&mut self, id: ProductId, quantity: u32, size: Size) {
        self.add_to_cart(id, quantity, size);
        self.navigate(Page::Cart);
    }

    /// Set a cart line's quantity; 0 or less removes the line (with a
    /// removal toast, matching an explicit remove).
    pub fn set_cart_quantity(&mut self, id: ProductId, size: Size, quantity: i32) {
        if let Some(removed) = self.cart.set_quantity(id, size, quantity) {
            self.notifications
                .success(format!("{} removed from cart", removed.name));
        }
    }

    /// Remove a cart line and queue a removal toast. No-op on unknown keys.
    pub fn remove_from_cart(&mut self, id: ProductId, size: Size) {
        if let Some(removed) = self.cart.remove_line(id, size) {
            self.notifications
                .success(format!("{} removed from cart", removed.name));
        }
    }

    // =========================================================================
    // Listing filter / sort / search
    // =========================================================================

    /// Set (or clear) the category filter and recompute the listing.
    pub fn set_category_filter(&mut self, category: Option<&str>) {
        self.category = category.map(str::to_owned);
        self.refresh_listing();
    }

    /// Set the sort order and recompute the listing.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.refresh_listing();
    }

    /// Replace the listing with search results. An empty or whitespace-only
    /// query restores the full catalog in natural order.
    pub fn search(&mut self, query: &str) {
        self.listing = self.catalog.search(query);
    }

    fn refresh_listing(&mut self) {
        self.listing = self.catalog.query(self.category.as_deref(), self.sort);
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Submit the shipping form (accepted unvalidated) and advance to the
    /// payment step.
    pub fn submit_shipping(&mut self, details: ShippingDetails) {
        self.checkout.submit_shipping(details);
    }

    /// Submit the payment form (accepted unvalidated) and start the
    /// simulated processing delay. The order finalizes when the delay
    /// elapses via [`StorefrontSession::advance`].
    pub fn submit_payment(&mut self, details: PaymentDetails) {
        self.notifications.success("Processing payment...");
        self.checkout.submit_payment(details);
    }

    #[instrument(skip(self))]
    fn finalize_order(&mut self) {
        let order = Order {
            number: generate_order_number(),
            lines: self.cart.lines().to_vec(),
            total: Price::new(self.cart.total(), self.cart.currency()),
        };
        tracing::info!(
            order_number = %order.number,
            total = %order.total,
            lines = order.lines.len(),
            "order finalized"
        );

        self.cart.clear();
        self.notifications.success(random_success_message());
        self.last_order = Some(order);
        self.navigate(Page::ThankYou);
    }

    // =========================================================================
    // Supplementary forms (toast-only acknowledgments)
    // =========================================================================

    /// Newsletter signup: acknowledged, never stored.
    pub fn subscribe_newsletter(&mut self, _email: &str) {
        self.notifications.success("Thank you for subscribing!");
    }

    /// Contact form: acknowledged, never stored.
    pub fn submit_contact(&mut self, _message: &str) {
        self.notifications
            .success("Thank you for your message! We'll get back to you soon.");
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advance session time, firing due timers in order.
    ///
    /// A single call may span several deadlines (e.g. a 5 s advance fires
    /// five countdown ticks); each fired handler runs before the next
    /// deadline is considered, so a cancellation inside a handler suppresses
    /// later ticks exactly as wall-clock scheduling would.
    pub fn advance(&mut self, elapsed: Duration) {
        let mut remaining = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        loop {
            let next_due = match (
                self.router.countdown_remaining_ms(),
                self.checkout.delay_remaining_ms(),
            ) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };

            match next_due {
                Some(due) if due <= remaining => {
                    remaining -= due;
                    // Age both slots before running handlers, so a deadline
                    // scheduled inside a handler is not consumed by the very
                    // step that triggered it.
                    let delay_fired = self.checkout.advance_delay(due);
                    let countdown = self.router.advance_countdown(due);
                    if delay_fired {
                        self.finalize_order();
                    }
                    if countdown == CountdownTick::Finished {
                        self.navigate(Page::Home);
                    }
                }
                _ => {
                    // Nothing (more) fires within this advance; just age the
                    // pending deadlines.
                    let _ = self.checkout.advance_delay(remaining);
                    let _ = self.router.advance_countdown(remaining);
                    break;
                }
            }

            if remaining == 0 {
                break;
            }
        }
    }

    // =========================================================================
    // Outbound projections
    // =========================================================================

    /// The view model for the active page.
    #[must_use]
    pub fn view_model(&self) -> PageView {
        match self.router.current() {
            Page::Home => PageView::Home(views::home_view(&self.catalog)),
            Page::Products => PageView::Products(views::listing_view(&self.listing)),
            Page::ProductDetail => PageView::ProductDetail(
                self.router
                    .focused()
                    .and_then(|id| self.catalog.find(id))
                    .map(Into::into),
            ),
            Page::Cart => PageView::Cart(views::cart_view(&self.cart)),
            Page::Checkout => {
                PageView::Checkout(views::checkout_view(&self.cart, &self.checkout))
            }
            Page::ThankYou => PageView::ThankYou(self.last_order.as_ref().map(|order| {
                views::thank_you_view(order, self.router.countdown_seconds().unwrap_or(0))
            })),
        }
    }

    /// The cart-badge indicator signal.
    #[must_use]
    pub fn cart_badge(&self) -> CartBadge {
        views::cart_badge(&self.cart)
    }

    /// The cart dropdown preview.
    #[must_use]
    pub fn cart_dropdown(&self) -> CartDropdownView {
        views::dropdown_view(&self.cart)
    }

    /// Remaining seconds on the thank-you redirect countdown, if pending.
    #[must_use]
    pub const fn countdown_seconds(&self) -> Option<u32> {
        self.router.countdown_seconds()
    }

    /// Take all queued toasts, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Toast> {
        self.notifications.drain()
    }
}

#[cfg(test)]
mod tests {
    use crate::notify::ToastKind;

    use super::*;

    fn session() -> StorefrontSession {
        StorefrontSession::new().expect("embedded catalog parses")
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        assert_eq!(session.current_page(), Page::Home);
        assert!(session.cart().is_empty());
        assert!(!session.cart_badge().visible);
    }

    #[test]
    fn test_view_product_focuses_and_navigates() {
        let mut session = session();
        session.view_product(ProductId::new(2));
        assert_eq!(session.current_page(), Page::ProductDetail);
        match session.view_model() {
            PageView::ProductDetail(Some(view)) => {
                assert_eq!(view.name, "AEROMERGE Velocity Knit");
            }
            other => panic!("expected detail view, got {other:?}"),
        }
    }

    #[test]
    fn test_view_unknown_product_is_noop() {
        let mut session = session();
        session.view_product(ProductId::new(404));
        assert_eq!(session.current_page(), Page::Home);
    }

    #[test]
    fn test_add_to_cart_queues_confirmation_toast() {
        let mut session = session();
        session.add_to_cart(ProductId::new(1), 1, Size::new(9));
        let toasts = session.drain_notifications();
        assert_eq!(
            toasts.first().map(|t| t.message.as_str()),
            Some("AEROMERGE Drift Knit added to cart!")
        );
    }

    #[test]
    fn test_buy_now_adds_and_opens_cart() {
        let mut session = session();
        session.buy_now(ProductId::new(3), 2, Size::new(10));
        assert_eq!(session.current_page(), Page::Cart);
        assert_eq!(session.cart().item_count(), 2);
    }

    #[test]
    fn test_checkout_blocked_on_empty_cart() {
        let mut session = session();
        session.navigate(Page::Checkout);
        assert_eq!(session.current_page(), Page::Home);

        let toasts = session.drain_notifications();
        assert_eq!(toasts.first().map(|t| t.kind), Some(ToastKind::Error));
        assert_eq!(
            toasts.first().map(|t| t.message.as_str()),
            Some("Your cart is empty")
        );
    }

    #[test]
    fn test_checkout_allowed_with_items_and_total_matches() {
        let mut session = session();
        session.add_to_cart(ProductId::new(1), 2, Size::new(9));
        session.navigate(Page::Checkout);
        assert_eq!(session.current_page(), Page::Checkout);

        match session.view_model() {
            PageView::Checkout(view) => {
                assert_eq!(view.step, crate::checkout::CheckoutStep::Shipping);
                assert_eq!(view.total, "€299.98");
            }
            other => panic!("expected checkout view, got {other:?}"),
        }
    }

    #[test]
    fn test_search_then_filter_last_op_wins() {
        let mut session = session();
        session.navigate(Page::Products);
        session.search("knit");
        match session.view_model() {
            PageView::Products(view) => assert_eq!(view.products.len(), 2),
            other => panic!("expected listing, got {other:?}"),
        }

        session.set_category_filter(Some("racing"));
        match session.view_model() {
            PageView::Products(view) => {
                assert_eq!(view.products.len(), 1);
                assert_eq!(
                    view.products.first().map(|p| p.name.as_str()),
                    Some("AEROMERGE Pulse Racer")
                );
            }
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn test_search_results_survive_detail_and_back_navigation() {
        let mut session = session();
        session.navigate(Page::Products);
        session.search("knit");

        session.view_product(ProductId::new(1));
        session.navigate(Page::Products);

        match session.view_model() {
            PageView::Products(view) => {
                assert_eq!(view.products.len(), 2);
            }
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_search_restores_natural_order() {
        let mut session = session();
        session.navigate(Page::Products);
        session.set_sort(SortKey::PriceHigh);
        session.search("");
        match session.view_model() {
            PageView::Products(view) => {
                let ids: Vec<i32> = view.products.iter().map(|p| p.id.as_i32()).collect();
                assert_eq!(ids, vec![1, 2, 3]);
            }
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn test_countdown_auto_redirects_home_after_five_seconds() {
        let mut session = session();
        session.navigate(Page::ThankYou);
        assert_eq!(session.countdown_seconds(), Some(5));

        session.advance(Duration::from_secs(5));
        assert_eq!(session.current_page(), Page::Home);
        assert_eq!(session.countdown_seconds(), None);
    }

    #[test]
    fn test_navigating_away_mid_countdown_cancels_redirect() {
        let mut session = session();
        session.navigate(Page::ThankYou);
        session.advance(Duration::from_secs(3));
        assert_eq!(session.countdown_seconds(), Some(2));

        session.navigate(Page::Products);
        session.advance(Duration::from_secs(10));
        assert_eq!(session.current_page(), Page::Products);
    }

    #[test]
    fn test_payment_finalizes_after_delay_and_resets_cart() {
        let mut session = session();
        session.add_to_cart(ProductId::new(1), 2, Size::new(9));
        session.navigate(Page::Checkout);
        session.submit_shipping(ShippingDetails::default());
        session.submit_payment(PaymentDetails::default());
        assert_eq!(session.current_page(), Page::Checkout);

        session.advance(Duration::from_millis(1_500));
        assert_eq!(session.current_page(), Page::ThankYou);
        assert!(session.cart().is_empty());
        assert_eq!(session.cart_badge().count, 0);

        match session.view_model() {
            PageView::ThankYou(Some(view)) => {
                assert!(view.order_number.starts_with("AER"));
                assert_eq!(view.total, "€299.98");
                assert_eq!(view.countdown_seconds, 5);
            }
            other => panic!("expected thank-you view, got {other:?}"),
        }
    }

    #[test]
    fn test_order_is_dropped_when_leaving_thank_you() {
        let mut session = session();
        session.add_to_cart(ProductId::new(1), 1, Size::new(9));
        session.navigate(Page::Checkout);
        session.submit_shipping(ShippingDetails::default());
        session.submit_payment(PaymentDetails::default());
        session.advance(Duration::from_millis(1_500));

        session.continue_shopping();
        assert_eq!(session.current_page(), Page::Home);

        session.navigate(Page::ThankYou);
        assert!(matches!(session.view_model(), PageView::ThankYou(None)));
    }

    #[test]
    fn test_thank_you_countdown_then_home_after_checkout() {
        let mut session = session();
        session.add_to_cart(ProductId::new(2), 1, Size::new(8));
        session.navigate(Page::Checkout);
        session.submit_shipping(ShippingDetails::default());
        session.submit_payment(PaymentDetails::default());

        // 1.5 s of processing plus the full 5 s countdown in one advance.
        session.advance(Duration::from_millis(6_500));
        assert_eq!(session.current_page(), Page::Home);
    }

    #[test]
    fn test_newsletter_and_contact_acknowledgments() {
        let mut session = session();
        session.subscribe_newsletter("ada@example.com");
        session.submit_contact("hello");
        let toasts = session.drain_notifications();
        assert_eq!(toasts.len(), 2);
        assert!(toasts.iter().all(|t| t.kind == ToastKind::Success));
    }
}
