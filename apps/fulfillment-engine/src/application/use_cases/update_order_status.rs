//! Update Order Status Use Case

use std::sync::Arc;

use crate::application::dto::{OrderDto, UpdateOrderStatusRequest};
use crate::application::ports::{EventPublisherPort, publish_best_effort};
use crate::domain::order_fulfillment::{
    OrderEvent, OrderRepository, OrderStateMachine, OrderStatus,
};
use crate::domain::shared::OrderId;
use crate::error::ServiceError;
use crate::observability::record_status_transition;

/// Use case for moving an order through its lifecycle.
pub struct UpdateOrderStatusUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    order_repo: Arc<O>,
    event_publisher: Arc<E>,
    state_machine: OrderStateMachine,
}

impl<O, E> UpdateOrderStatusUseCase<O, E>
where
    O: OrderRepository,
    E: EventPublisherPort,
{
    /// Create a new UpdateOrderStatusUseCase.
    pub const fn new(
        order_repo: Arc<O>,
        event_publisher: Arc<E>,
        state_machine: OrderStateMachine,
    ) -> Self {
        Self {
            order_repo,
            event_publisher,
            state_machine,
        }
    }

    /// Execute the use case.
    ///
    /// The transition is checked against the stored status and written back
    /// in one repository step, so two concurrent updates cannot both pass the
    /// policy check against the same prior state.
    ///
    /// # Errors
    ///
    /// - `INVALID_STATUS` if the target is not a lifecycle state
    /// - `ORDER_NOT_FOUND` if no order has this id
    /// - `INVALID_STATE_TRANSITION` if the transition policy refuses
    pub async fn execute(
        &self,
        order_id: &OrderId,
        request: UpdateOrderStatusRequest,
    ) -> Result<OrderDto, ServiceError> {
        let target: OrderStatus = request.status.parse()?;

        let machine = self.state_machine.clone();
        let tracking_number = request.tracking_number;
        let mut order = self
            .order_repo
            .update(
                order_id,
                Box::new(move |order| order.transition_to(target, tracking_number, &machine)),
            )
            .await?;

        let from = order.pending_events().iter().find_map(|event| match event {
            OrderEvent::StatusChanged(changed) => Some(changed.from),
            _ => None,
        });

        record_status_transition(target.as_str());
        tracing::info!(
            order_id = %order.id(),
            from = from.as_ref().map(OrderStatus::as_str).unwrap_or_default(),
            to = %target,
            tracking_number = order.tracking_number().unwrap_or_default(),
            "Order status updated"
        );

        let dto = OrderDto::from_order(&order);
        publish_best_effort(&*self.event_publisher, order.drain_events()).await;
        Ok(dto)
    }
}
