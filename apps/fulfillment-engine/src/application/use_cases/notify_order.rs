//! Notify Order Use Case

use std::sync::Arc;

use crate::application::dto::{NotificationResponseDto, NotifyOrderRequest};
use crate::application::ports::{NotificationPort, OrderNotification};
use crate::domain::order_fulfillment::OrderRepository;
use crate::domain::shared::{NotificationId, OrderId, Timestamp};
use crate::error::ServiceError;

/// Use case for sending a customer notification about an order.
pub struct NotifyOrderUseCase<O, N>
where
    O: OrderRepository,
    N: NotificationPort,
{
    order_repo: Arc<O>,
    notifier: Arc<N>,
}

impl<O, N> NotifyOrderUseCase<O, N>
where
    O: OrderRepository,
    N: NotificationPort,
{
    /// Create a new NotifyOrderUseCase.
    pub const fn new(order_repo: Arc<O>, notifier: Arc<N>) -> Self {
        Self {
            order_repo,
            notifier,
        }
    }

    /// Execute the use case.
    ///
    /// The recipient is the override email when given, otherwise the
    /// shipping email.
    ///
    /// # Errors
    ///
    /// - `ORDER_NOT_FOUND` if no order has this id
    /// - Internal error if the notifier fails
    pub async fn execute(
        &self,
        order_id: &OrderId,
        request: NotifyOrderRequest,
    ) -> Result<NotificationResponseDto, ServiceError> {
        let order = self
            .order_repo
            .find_by_order_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::order_not_found(order_id.as_str()))?;

        let email = request
            .email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| order.shipping_info().email.clone());

        let notification = OrderNotification {
            id: NotificationId::generate(),
            order_id: order.id().clone(),
            customer_name: order.shipping_info().customer_name(),
            email,
            notification_type: request.notification_type,
            message: request.message,
            sent_at: Timestamp::now(),
            status: order.status(),
        };

        self.notifier.send(&notification).await.map_err(|e| {
            tracing::error!(order_id = %order_id, error = %e, "Notification dispatch failed");
            ServiceError::internal(e.to_string())
        })?;

        Ok(NotificationResponseDto {
            message: "Notification sent successfully".to_string(),
            notification,
        })
    }
}
