//! Single-slot cancellable timers.
//!
//! The session is single-threaded and event-driven; "time" only moves when
//! the host calls `StorefrontSession::advance`. A [`TimerSlot`] holds at
//! most one pending deadline - scheduling while a deadline is pending
//! replaces it, so overlapping callbacks of the same kind cannot exist.

/// A single-slot countdown timer measured in milliseconds.
#[derive(Debug, Default)]
pub struct TimerSlot {
    remaining_ms: Option<u64>,
}

impl TimerSlot {
    /// Create an idle slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { remaining_ms: None }
    }

    /// Schedule the timer to fire after `ms` milliseconds, replacing any
    /// pending deadline.
    pub fn schedule(&mut self, ms: u64) {
        self.remaining_ms = Some(ms);
    }

    /// Cancel the pending deadline, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.remaining_ms.take().is_some()
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Milliseconds until the pending deadline, if any.
    #[must_use]
    pub const fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms
    }

    /// Advance time by `ms` milliseconds. Returns `true` exactly when the
    /// pending deadline is reached; the slot is then idle again.
    pub fn advance(&mut self, ms: u64) -> bool {
        match self.remaining_ms {
            Some(remaining) if remaining <= ms => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - ms);
                false
            }
            None => false,
        }
    }
}
