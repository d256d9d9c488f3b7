//! View router: a finite-state page switcher.
//!
//! The router tracks the current page, the product in focus on the detail
//! page, and the thank-you redirect countdown. Page-entry side effects that
//! need catalog or cart access (refreshing the listing, resetting the
//! checkout step, the empty-cart guard) are driven by the session, which
//! owns both the router and that state.

use serde::{Deserialize, Serialize};

use aeromerge_core::ProductId;

use crate::timer::TimerSlot;

/// Seconds shown on the thank-you page before auto-redirecting home.
pub const REDIRECT_COUNTDOWN_SECS: u32 = 5;

const COUNTDOWN_TICK_MS: u64 = 1_000;

/// The fixed set of pages. The checkout shipping/payment sub-steps live in
/// the checkout flow, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    #[default]
    Home,
    Products,
    ProductDetail,
    Cart,
    Checkout,
    ThankYou,
}

/// Result of advancing the redirect countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// No pending countdown, or the deadline was not reached.
    Idle,
    /// One second elapsed; the new remaining value is shown on the page.
    Tick(u32),
    /// The countdown reached zero; the session navigates home.
    Finished,
}

/// Finite-state page switcher with a single-slot redirect countdown.
#[derive(Debug, Default)]
pub struct ViewRouter {
    current: Page,
    focused: Option<ProductId>,
    countdown: TimerSlot,
    countdown_seconds: u32,
}

impl ViewRouter {
    /// Create a router on the initial page (home).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed page.
    #[must_use]
    pub const fn current(&self) -> Page {
        self.current
    }

    /// The product in focus on the detail page, set when entering it.
    #[must_use]
    pub const fn focused(&self) -> Option<ProductId> {
        self.focused
    }

    /// Set the product in focus for the detail page.
    pub fn focus(&mut self, id: ProductId) {
        self.focused = Some(id);
    }

    /// Switch to `page`.
    ///
    /// Any pending redirect countdown is cancelled first, so navigating away
    /// from the thank-you page never leaves an orphaned timer. Entering
    /// `ThankYou` (re)starts the countdown at [`REDIRECT_COUNTDOWN_SECS`].
    pub fn enter(&mut self, page: Page) {
        if self.countdown.cancel() {
            tracing::debug!("redirect countdown cancelled");
        }
        self.current = page;
        if page == Page::ThankYou {
            self.countdown_seconds = REDIRECT_COUNTDOWN_SECS;
            self.countdown.schedule(COUNTDOWN_TICK_MS);
        }
        tracing::debug!(?page, "entered page");
    }

    /// Remaining seconds on the redirect countdown, when one is pending.
    #[must_use]
    pub const fn countdown_seconds(&self) -> Option<u32> {
        if self.countdown.is_pending() {
            Some(self.countdown_seconds)
        } else {
            None
        }
    }

    pub(crate) const fn countdown_remaining_ms(&self) -> Option<u64> {
        self.countdown.remaining_ms()
    }

    /// Advance the countdown by `ms`. Fires at most one tick; the session
    /// loops over due deadlines when a large `advance` spans several.
    pub(crate) fn advance_countdown(&mut self, ms: u64) -> CountdownTick {
        if !self.countdown.advance(ms) {
            return CountdownTick::Idle;
        }

        self.countdown_seconds = self.countdown_seconds.saturating_sub(1);
        if self.countdown_seconds == 0 {
            tracing::debug!("redirect countdown finished");
            CountdownTick::Finished
        } else {
            self.countdown.schedule(COUNTDOWN_TICK_MS);
            CountdownTick::Tick(self.countdown_seconds)
        }
    }
}
