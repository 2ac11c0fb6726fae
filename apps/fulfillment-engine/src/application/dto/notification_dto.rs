//! Notification DTOs.

use serde::Serialize;

use crate::application::ports::OrderNotification;

/// Notification request for one order.
#[derive(Debug, Clone, Default)]
pub struct NotifyOrderRequest {
    /// Free-form category.
    pub notification_type: String,
    /// Body text.
    pub message: String,
    /// Recipient override; defaults to the shipping email.
    pub email: Option<String>,
}

/// Notification response.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponseDto {
    /// Outcome message.
    pub message: String,
    /// What was sent.
    pub notification: OrderNotification,
}
