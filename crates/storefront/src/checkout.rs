//! Checkout flow: shipping -> payment -> finalization.
//!
//! Two linear steps. Shipping and payment details are accepted as free-form
//! strings with no validation - an explicit design choice for this demo,
//! not an oversight. Do not add Luhn checks, expiry validation, or required
//! fields here unless the requirements change.

use chrono::Utc;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use aeromerge_core::Price;

use crate::cart::CartLine;
use crate::timer::TimerSlot;

/// Simulated payment-processing delay.
pub const PAYMENT_DELAY_MS: u64 = 1_500;

/// Order-number prefix.
const ORDER_NUMBER_PREFIX: &str = "AER";

/// Success messages shown when an order is finalized.
const ORDER_SUCCESS_MESSAGES: [&str; 4] = [
    "Your order is ready for takeoff!",
    "Gravity-defying shoes incoming!",
    "Mission accomplished - order confirmed!",
    "Your AEROMERGE experience begins now!",
];

/// The two linear checkout steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
}

/// Free-form shipping address data. Never validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Free-form card data. Never validated; cosmetic input masking is a
/// presentation concern and out of scope here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub cardholder: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

/// An ephemeral order, built at checkout finalization and held only while
/// the thank-you page displays it.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub number: String,
    pub lines: Vec<CartLine>,
    pub total: Price,
}

/// The shipping -> payment state machine plus the simulated processing
/// delay timer.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: Option<ShippingDetails>,
    delay: TimerSlot,
}

impl CheckoutFlow {
    /// Create a flow at the shipping step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Whether a submitted payment is still "processing".
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.delay.is_pending()
    }

    /// Shipping details captured so far, if the shipping step was submitted.
    #[must_use]
    pub const fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping.as_ref()
    }

    /// Reset to the shipping step, discarding captured details and any
    /// pending processing delay. Invoked on checkout page entry.
    pub fn reset(&mut self) {
        self.step = CheckoutStep::Shipping;
        self.shipping = None;
        self.delay.cancel();
    }

    /// Accept the shipping form and advance to the payment step.
    ///
    /// The payload is stored as-is; nothing is validated.
    pub fn submit_shipping(&mut self, details: ShippingDetails) {
        self.shipping = Some(details);
        self.step = CheckoutStep::Payment;
        tracing::debug!("checkout advanced to payment step");
    }

    /// Accept the payment form and start the simulated processing delay.
    ///
    /// Submitting again while processing replaces the pending delay; two
    /// finalizations can never race.
    pub fn submit_payment(&mut self, _details: PaymentDetails) {
        self.delay.schedule(PAYMENT_DELAY_MS);
        tracing::debug!(delay_ms = PAYMENT_DELAY_MS, "payment processing started");
    }

    pub(crate) const fn delay_remaining_ms(&self) -> Option<u64> {
        self.delay.remaining_ms()
    }

    /// Advance the processing delay. Returns `true` when it expires and the
    /// order should be finalized.
    pub(crate) fn advance_delay(&mut self, ms: u64) -> bool {
        self.delay.advance(ms)
    }
}

/// Generate an order number from the last eight digits of a millisecond
/// timestamp. Unique enough for a single demo session; not cryptographic.
#[must_use]
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let tail = millis.len().saturating_sub(8);
    format!(
        "{ORDER_NUMBER_PREFIX}{}",
        millis.get(tail..).unwrap_or(&millis)
    )
}

/// Pick a random order-success message.
#[must_use]
pub fn random_success_message() -> &'static str {
    let mut rng = rand::rng();
    ORDER_SUCCESS_MESSAGES
        .choose(&mut rng)
        .copied()
        .unwrap_or(ORDER_SUCCESS_MESSAGES[0])
}
