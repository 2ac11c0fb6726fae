//! Delete Order Use Case

use std::sync::Arc;

use crate::application::ports::{EventPublisherPort, publish_best_effort};
use crate::domain::order_fulfillment::{OrderDeleted, OrderEvent, OrderRepository};
use crate::domain::shared::{OrderId, Timestamp};
use crate::error::ServiceError;
use crate::observability::record_order_deleted;

/// Use case for removing an order.
///
/// Stock taken by the order is not returned to the catalog.
pub struct DeleteOrderUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    order_repo: Arc<O>,
    event_publisher: Arc<E>,
}

impl<O, E> DeleteOrderUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Create a new DeleteOrderUseCase.
    pub const fn new(order_repo: Arc<O>, event_publisher: Arc<E>) -> Self {
        Self {
            order_repo,
            event_publisher,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `ORDER_NOT_FOUND` if no order has this id.
    pub async fn execute(&self, order_id: &OrderId) -> Result<(), ServiceError> {
        let order = self
            .order_repo
            .delete(order_id)
            .await?
            .ok_or_else(|| ServiceError::order_not_found(order_id.as_str()))?;

        record_order_deleted();
        tracing::info!(
            order_id = %order.id(),
            status = %order.status(),
            "Order deleted"
        );

        let event = OrderEvent::Deleted(OrderDeleted {
            order_id: order.id().clone(),
            status: order.status(),
            occurred_at: Timestamp::now(),
        });
        publish_best_effort(&*self.event_publisher, vec![event]).await;
        Ok(())
    }
}
