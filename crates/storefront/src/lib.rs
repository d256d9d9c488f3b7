//! AEROMERGE headless storefront core.
//!
//! A single-session, in-memory storefront: static product catalog, shopping
//! cart, simulated checkout. There is no backend and no persistence; the
//! crate exposes view models, a cart-badge signal, and toast notifications
//! for a presentation layer to render, and consumes page navigation, cart
//! mutations, and form submissions from it.
//!
//! # Modules
//!
//! - [`catalog`] - Immutable product catalog with filter/sort/search queries
//! - [`cart`] - Cart engine with observer-based change notification
//! - [`router`] - Finite-state page switcher with the redirect countdown
//! - [`checkout`] - Shipping -> payment flow and order finalization
//! - [`views`] - Render-ready view-model projections
//! - [`session`] - The session-state object tying everything together
//! - [`notify`] - Toast notification queue
//! - [`timer`] - Single-slot cancellable timers
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use aeromerge_core::{ProductId, Size};
//! use aeromerge_storefront::{Page, StorefrontSession};
//!
//! let mut session = StorefrontSession::new()?;
//! session.add_to_cart(ProductId::new(1), 2, Size::new(9));
//! session.navigate(Page::Checkout);
//! session.submit_shipping(Default::default());
//! session.submit_payment(Default::default());
//! session.advance(Duration::from_millis(1_500));
//! assert_eq!(session.current_page(), Page::ThankYou);
//! # Ok::<(), aeromerge_storefront::CatalogError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notify;
pub mod router;
pub mod session;
pub mod timer;
pub mod views;

pub use cart::{CartEngine, CartEvent, CartLine, CartObserver, CartSummary};
pub use catalog::{CatalogError, CatalogStore, Product, SortKey};
pub use checkout::{CheckoutStep, Order, PaymentDetails, ShippingDetails};
pub use notify::{Toast, ToastKind};
pub use router::Page;
pub use session::StorefrontSession;
pub use views::PageView;
