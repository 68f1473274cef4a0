//! User-facing failure notifications.

use mockall::automock;

/// Fire-and-forget channel for user-visible error messages, the counterpart
/// of a transient UI toast. No return value is consumed.
#[automock]
pub trait NotificationSink: Send + Sync {
    /// Surface a message to the user.
    fn notify(&self, message: &str);
}

/// Notification sink that emits messages through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(%message, "storefront request failed");
    }
}
