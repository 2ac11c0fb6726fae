//! Domain events for order fulfillment.
//!
//! Events are drained from the aggregate after a successful write and handed
//! to the configured publisher.

use serde::{Deserialize, Serialize};

use super::value_objects::OrderStatus;
use crate::domain::shared::{Money, OrderId, Timestamp, UserId};

/// All possible order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Order accepted and stock reserved.
    Placed(OrderPlaced),
    /// Staff moved the order to another status.
    StatusChanged(OrderStatusChanged),
    /// Order removed by an admin.
    Deleted(OrderDeleted),
}

impl OrderEvent {
    /// Get the order ID for this event.
    #[must_use]
    pub fn order_id(&self) -> &OrderId {
        match self {
            Self::Placed(e) => &e.order_id,
            Self::StatusChanged(e) => &e.order_id,
            Self::Deleted(e) => &e.order_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub fn occurred_at(&self) -> Timestamp {
        match self {
            Self::Placed(e) => e.occurred_at,
            Self::StatusChanged(e) => e.occurred_at,
            Self::Deleted(e) => e.occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Placed(_) => "ORDER_PLACED",
            Self::StatusChanged(_) => "ORDER_STATUS_CHANGED",
            Self::Deleted(_) => "ORDER_DELETED",
        }
    }
}

/// Event: order placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    /// Order ID.
    pub order_id: OrderId,
    /// Submitting account.
    pub user_id: UserId,
    /// Number of line items.
    pub item_count: usize,
    /// Grand total.
    pub total: Money,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    /// Order ID.
    pub order_id: OrderId,
    /// Status before the change.
    pub from: OrderStatus,
    /// Status after the change.
    pub to: OrderStatus,
    /// Carrier tracking number, if set.
    pub tracking_number: Option<String>,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: order deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDeleted {
    /// Order ID.
    pub order_id: OrderId,
    /// Status at deletion.
    pub status: OrderStatus,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_and_serialization_tag() {
        let event = OrderEvent::Deleted(OrderDeleted {
            order_id: OrderId::new("ORD-1"),
            status: OrderStatus::Pending,
            occurred_at: Timestamp::now(),
        });

        assert_eq!(event.event_type(), "ORDER_DELETED");
        assert_eq!(event.order_id().as_str(), "ORD-1");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DELETED");
        assert_eq!(json["status"], "pending");
    }
}
