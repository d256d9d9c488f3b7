//! Transient toast notifications.
//!
//! The core never renders a toast; it queues them here and the presentation
//! layer drains the queue after each event. Display duration and dismissal
//! are presentation concerns.

use serde::Serialize;

/// Visual kind of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// FIFO queue of pending toasts, drained by the presentation layer.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: Vec<Toast>,
}

impl Notifications {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queue a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast {
            message: message.into(),
            kind: ToastKind::Success,
        });
    }

    /// Queue an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast {
            message: message.into(),
            kind: ToastKind::Error,
        });
    }

    /// Queue a toast.
    pub fn push(&mut self, toast: Toast) {
        tracing::debug!(message = %toast.message, kind = ?toast.kind, "toast queued");
        self.queue.push(toast);
    }

    /// Take all pending toasts, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.queue)
    }

    /// Whether any toasts are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties_queue() {
        let mut notifications = Notifications::new();
        notifications.success("first");
        notifications.error("second");

        let toasts = notifications.drain();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts.first().map(|t| t.message.as_str()), Some("first"));
        assert_eq!(toasts.first().map(|t| t.kind), Some(ToastKind::Success));
        assert_eq!(toasts.get(1).map(|t| t.kind), Some(ToastKind::Error));
        assert!(notifications.is_empty());
    }
}
