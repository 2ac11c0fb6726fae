//! Order DTOs

use serde::Serialize;

use crate::domain::order_fulfillment::{
    CardInfo, LineItem, Order, OrderStatus, PaymentMethod, PaymentStatus, ShippingInfo,
};
use crate::domain::shared::{Money, OrderId, Timestamp, UserId};

/// JSON document for one order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    /// Human-facing id.
    pub order_id: OrderId,
    /// Submitting account.
    pub user_id: UserId,
    /// Line items.
    pub items: Vec<LineItem>,
    /// Shipping contact and address.
    pub shipping_info: ShippingInfo,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Card display data, `null` unless paid by card.
    pub card_info: Option<CardInfo>,
    /// Subtotal.
    pub subtotal: Money,
    /// Tax.
    pub tax: Money,
    /// Shipping fee.
    pub shipping: Money,
    /// Grand total.
    pub total: Money,
    /// Customer notes.
    pub order_notes: String,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Carrier tracking number.
    pub tracking_number: Option<String>,
    /// Order date.
    pub order_date: Timestamp,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last update time.
    pub updated_at: Timestamp,
}

impl OrderDto {
    /// Create from domain Order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        let totals = order.totals();
        Self {
            order_id: order.id().clone(),
            user_id: order.user_id().clone(),
            items: order.items().to_vec(),
            shipping_info: order.shipping_info().clone(),
            payment_method: order.payment_method(),
            card_info: order.card_info().cloned(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
            order_notes: order.order_notes().to_string(),
            status: order.status(),
            payment_status: order.payment_status(),
            tracking_number: order.tracking_number().map(str::to_string),
            order_date: order.order_date(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self::from_order(order)
    }
}

/// Status change request.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderStatusRequest {
    /// Target status, still unparsed.
    pub status: String,
    /// Replacement tracking number.
    pub tracking_number: Option<String>,
}
