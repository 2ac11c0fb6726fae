//! Place Order Use Case

use std::sync::Arc;
use std::time::Instant;

use crate::application::dto::OrderDto;
use crate::application::ports::{CatalogPort, EventPublisherPort, publish_best_effort};
use crate::application::services::InventoryReservationEngine;
use crate::domain::order_fulfillment::{
    AssemblyPolicy, Order, OrderAssembler, OrderError, OrderRepository, RawOrderSubmission,
};
use crate::domain::shared::UserId;
use crate::error::ServiceError;
use crate::observability::{record_order_placed, record_placement_failure};

/// Use case for placing an order: assemble, reserve stock, persist.
pub struct PlaceOrderUseCase<O, C, E>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
{
    order_repo: Arc<O>,
    reservations: Arc<InventoryReservationEngine<C>>,
    event_publisher: Arc<E>,
    assembler: OrderAssembler,
}

impl<O, C, E> PlaceOrderUseCase<O, C, E>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
{
    /// Create a new PlaceOrderUseCase.
    pub fn new(
        order_repo: Arc<O>,
        catalog: Arc<C>,
        event_publisher: Arc<E>,
        policy: AssemblyPolicy,
    ) -> Self {
        Self {
            order_repo,
            reservations: Arc::new(InventoryReservationEngine::new(catalog)),
            event_publisher,
            assembler: OrderAssembler::new(policy),
        }
    }

    /// Execute the use case.
    ///
    /// Assembly and validation happen before any storage access. The
    /// reservation, insert and compensation then run on a detached task, so
    /// they complete even if the caller goes away.
    ///
    /// # Errors
    ///
    /// - Validation errors from assembly
    /// - `DUPLICATE_ORDER_ID` if the client-supplied id is taken
    /// - `PRODUCT_NOT_FOUND` / `INSUFFICIENT_STOCK` from the reservation
    pub async fn execute(
        &self,
        submission: RawOrderSubmission,
        user_id: UserId,
    ) -> Result<OrderDto, ServiceError> {
        let started = Instant::now();

        let order = match self.assembler.assemble(&submission, user_id) {
            Ok(order) => order,
            Err(e) => {
                record_placement_failure("validation");
                return Err(e.into());
            }
        };

        if self.order_repo.exists(order.id()).await? {
            record_placement_failure("duplicate_order_id");
            return Err(OrderError::DuplicateOrderId {
                order_id: order.id().to_string(),
            }
            .into());
        }

        let order_repo = Arc::clone(&self.order_repo);
        let reservations = Arc::clone(&self.reservations);
        let event_publisher = Arc::clone(&self.event_publisher);

        let placed = tokio::spawn(async move {
            Self::reserve_and_insert(order, &*order_repo, &reservations, &*event_publisher).await
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Order placement task failed");
            ServiceError::internal(e.to_string())
        })??;

        record_order_placed(started.elapsed().as_secs_f64());
        Ok(placed)
    }

    async fn reserve_and_insert(
        mut order: Order,
        order_repo: &O,
        reservations: &InventoryReservationEngine<C>,
        event_publisher: &E,
    ) -> Result<OrderDto, ServiceError> {
        let reservation = match reservations.reserve(order.items()).await {
            Ok(reservation) => reservation,
            Err(e) => {
                record_placement_failure("stock");
                return Err(e.into());
            }
        };

        if let Err(e) = order_repo.insert(&order).await {
            let reason = match e {
                OrderError::DuplicateOrderId { .. } => "duplicate_order_id",
                _ => "storage",
            };
            record_placement_failure(reason);
            tracing::warn!(
                order_id = %order.id(),
                error = %e,
                units = reservation.total_units(),
                "Order write failed, releasing reserved stock"
            );
            let failed = reservations.release(&reservation).await;
            if failed > 0 {
                tracing::error!(
                    order_id = %order.id(),
                    failed,
                    "Stock compensation incomplete"
                );
            }
            return Err(e.into());
        }

        tracing::info!(
            order_id = %order.id(),
            user_id = %order.user_id(),
            items = order.item_count(),
            total = %order.totals().total,
            "Order placed"
        );

        let dto = OrderDto::from_order(&order);
        publish_best_effort(event_publisher, order.drain_events()).await;
        Ok(dto)
    }
}
