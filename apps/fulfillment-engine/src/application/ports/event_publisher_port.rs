//! Event Publisher Port (Driven Port)
//!
//! Interface for publishing domain events to external systems.

use async_trait::async_trait;

use crate::domain::order_fulfillment::events::OrderEvent;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// Serialization error.
    #[error("Event serialization error: {message}")]
    SerializationError { message: String },

    /// Publishing failed.
    #[error("Event publish failed: {message}")]
    PublishFailed { message: String },
}

/// Port for publishing domain events.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish order events.
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;

    /// Publish a single order event.
    async fn publish_order_event(&self, event: OrderEvent) -> Result<(), EventPublishError> {
        self.publish_order_events(vec![event]).await
    }
}

/// Publish and log failures. Publishing never fails the caller.
pub async fn publish_best_effort<P: EventPublisherPort + ?Sized>(
    publisher: &P,
    events: Vec<OrderEvent>,
) {
    if events.is_empty() {
        return;
    }
    if let Err(e) = publisher.publish_order_events(events).await {
        tracing::warn!(error = %e, "Failed to publish order events");
    }
}

/// No-op event publisher for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish_order_events(
        &self,
        _events: Vec<OrderEvent>,
    ) -> Result<(), EventPublishError> {
        Ok(())
    }
}

/// Writes each event to the log as structured JSON.
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisherPort for TracingEventPublisher {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in events {
            let payload = serde_json::to_string(&event).map_err(|e| {
                EventPublishError::SerializationError {
                    message: e.to_string(),
                }
            })?;
            tracing::info!(
                event_type = event.event_type(),
                order_id = %event.order_id(),
                payload = %payload,
                "Order event"
            );
        }
        Ok(())
    }
}
