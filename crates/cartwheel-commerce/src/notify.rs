//! User-facing failure notifications.
//!
//! The cart reports every rejected mutation through a [`Notifier`] instead
//! of returning it up the UI stack. Notifications carry a severity and a
//! message only, never an error code.

use std::sync::Mutex;

use serde::Serialize;

use crate::error::CartError;

/// Message for any out-of-stock rejection.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The request was valid but cannot be satisfied right now.
    Warning,
    Error,
}

/// Cart operation that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOp {
    Add,
    Remove,
    SetQuantity,
}

impl CartOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartOp::Add => "add",
            CartOp::Remove => "remove",
            CartOp::SetQuantity => "set_quantity",
        }
    }

    /// Message shown when the operation fails for a reason other than stock.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOp::Add => "Failed to add product",
            CartOp::Remove => "Failed to remove product",
            CartOp::SetQuantity => "Failed to update product quantity",
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// The notification for a rejected cart operation.
    pub fn for_failure(op: CartOp, error: &CartError) -> Self {
        match error {
            CartError::OutOfStock { .. } => Self::new(Severity::Warning, OUT_OF_STOCK_MESSAGE),
            CartError::NotFound(_) | CartError::InvalidAmount(_) | CartError::Generic(_) => {
                Self::new(Severity::Error, op.failure_message())
            }
        }
    }
}

/// Sink for user-facing notifications (a toast area, a status line, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Warning => tracing::warn!(target: "cartwheel::notify", "{}", notification.message),
            Severity::Error => tracing::error!(target: "cartwheel::notify", "{}", notification.message),
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }

    /// Drain the recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .map(|mut seen| std::mem::take(&mut *seen))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}
