//! Notification Port (Driven Port)
//!
//! Interface for sending order notifications to customers.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::order_fulfillment::OrderStatus;
use crate::domain::shared::{NotificationId, OrderId, Timestamp};

/// Notification dispatch error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    /// Delivery failed.
    #[error("Notification delivery failed: {message}")]
    DeliveryFailed {
        /// Transport error text.
        message: String,
    },
}

/// A customer notification about one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotification {
    /// Dispatch id.
    pub id: NotificationId,
    /// Order the notification is about.
    pub order_id: OrderId,
    /// `"First Last"` from shipping info.
    pub customer_name: String,
    /// Recipient.
    pub email: String,
    /// Free-form category, e.g. `shipping_update`.
    pub notification_type: String,
    /// Body text.
    pub message: String,
    /// Dispatch time.
    pub sent_at: Timestamp,
    /// Order status at dispatch.
    pub status: OrderStatus,
}

/// Port for delivering notifications.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Send a notification.
    async fn send(&self, notification: &OrderNotification) -> Result<(), NotificationError>;
}

/// Logs notifications instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl NotificationPort for LoggingNotifier {
    async fn send(&self, notification: &OrderNotification) -> Result<(), NotificationError> {
        tracing::info!(
            notification_id = %notification.id,
            order_id = %notification.order_id,
            to = %notification.email,
            notification_type = %notification.notification_type,
            message = %notification.message,
            "Order notification sent"
        );
        Ok(())
    }
}
