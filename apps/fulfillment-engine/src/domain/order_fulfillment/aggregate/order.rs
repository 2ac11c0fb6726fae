//! Order Aggregate Root
//!
//! Owns an order's contents and its fulfillment status. Stock is not part of
//! the aggregate: reservations happen against the catalog before an order is
//! placed, and references to users and products are by id only.

use serde::{Deserialize, Serialize};

use super::LineItem;
use crate::domain::order_fulfillment::errors::OrderError;
use crate::domain::order_fulfillment::events::{OrderEvent, OrderPlaced, OrderStatusChanged};
use crate::domain::order_fulfillment::services::OrderStateMachine;
use crate::domain::order_fulfillment::value_objects::{
    CardInfo, OrderStatus, OrderTotals, PaymentMethod, PaymentStatus, ShippingInfo,
};
use crate::domain::shared::{Money, OrderId, Timestamp, UserId};

/// Parameters for reconstituting an Order from storage.
///
/// No domain events are generated during reconstitution.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// Submitting account.
    pub user_id: UserId,
    /// Line items.
    pub items: Vec<LineItem>,
    /// Shipping contact and address.
    pub shipping_info: ShippingInfo,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Card display data.
    pub card_info: Option<CardInfo>,
    /// Monetary totals.
    pub totals: OrderTotals,
    /// Free-form customer notes.
    pub order_notes: String,
    /// Current status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Carrier tracking number.
    pub tracking_number: Option<String>,
    /// Order date.
    pub order_date: Timestamp,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// Command to place a new order.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    /// Client-supplied id; generated when `None`.
    pub order_id: Option<OrderId>,
    /// Submitting account.
    pub user_id: UserId,
    /// Normalized line items.
    pub items: Vec<LineItem>,
    /// Shipping contact and address.
    pub shipping_info: ShippingInfo,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Card display data, kept only for card payments.
    pub card_info: Option<CardInfo>,
    /// Resolved totals.
    pub totals: OrderTotals,
    /// Customer notes.
    pub order_notes: String,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
}

impl PlaceOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for missing items or email, and
    /// `InvalidItems` listing every line that fails the validity gate.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::InvalidParameters {
                field: "items".to_string(),
                message: "Items array is required".to_string(),
            });
        }

        if self.shipping_info.email.trim().is_empty() {
            return Err(OrderError::InvalidParameters {
                field: "shippingInfo".to_string(),
                message: "Shipping info with email is required".to_string(),
            });
        }

        let indexes: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_valid())
            .map(|(index, _)| index)
            .collect();
        if !indexes.is_empty() {
            return Err(OrderError::InvalidItems { indexes });
        }

        Ok(())
    }
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    items: Vec<LineItem>,
    shipping_info: ShippingInfo,
    payment_method: PaymentMethod,
    card_info: Option<CardInfo>,
    totals: OrderTotals,
    order_notes: String,
    status: OrderStatus,
    payment_status: PaymentStatus,
    tracking_number: Option<String>,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    order_date: Timestamp,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Place a new order from a command.
    ///
    /// The order always starts `pending`. Generates an `OrderPlaced` event.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn place(cmd: PlaceOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let id = cmd.order_id.unwrap_or_else(OrderId::generate);
        let card_info = match cmd.payment_method {
            PaymentMethod::Card => cmd.card_info,
            PaymentMethod::Paypal | PaymentMethod::Cash => None,
        };
        let now = Timestamp::now();

        let mut order = Self {
            id,
            user_id: cmd.user_id,
            items: cmd.items,
            shipping_info: cmd.shipping_info,
            payment_method: cmd.payment_method,
            card_info,
            totals: cmd.totals,
            order_notes: cmd.order_notes,
            status: OrderStatus::Pending,
            payment_status: cmd.payment_status,
            tracking_number: None,
            events: Vec::new(),
            order_date: now,
            created_at: now,
            updated_at: now,
        };

        order.events.push(OrderEvent::Placed(OrderPlaced {
            order_id: order.id.clone(),
            user_id: order.user_id.clone(),
            item_count: order.items.len(),
            total: order.totals.total,
            occurred_at: now,
        }));

        Ok(order)
    }

    /// Reconstitute an order from stored state (no events generated).
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        Self {
            id: params.id,
            user_id: params.user_id,
            items: params.items,
            shipping_info: params.shipping_info,
            payment_method: params.payment_method,
            card_info: params.card_info,
            totals: params.totals,
            order_notes: params.order_notes,
            status: params.status,
            payment_status: params.payment_status,
            tracking_number: params.tracking_number,
            events: Vec::new(),
            order_date: params.order_date,
            created_at: params.created_at,
            updated_at: params.updated_at,
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the submitting account.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Get the line items.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the shipping info.
    #[must_use]
    pub const fn shipping_info(&self) -> &ShippingInfo {
        &self.shipping_info
    }

    /// Get the payment method.
    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Get the card display data.
    #[must_use]
    pub const fn card_info(&self) -> Option<&CardInfo> {
        self.card_info.as_ref()
    }

    /// Get the totals.
    #[must_use]
    pub const fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Get the customer notes.
    #[must_use]
    pub fn order_notes(&self) -> &str {
        &self.order_notes
    }

    /// Get the status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Get the tracking number.
    #[must_use]
    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    /// Get the order date.
    #[must_use]
    pub const fn order_date(&self) -> Timestamp {
        self.order_date
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    /// Σ price × quantity over all lines, or `None` on overflow.
    #[must_use]
    pub fn items_subtotal(&self) -> Option<Money> {
        self.items
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }

    /// Case-insensitive match over the order id and shipping contact.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.id.as_str().to_lowercase().contains(needle)
            || self.shipping_info.matches_search(needle)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Move the order to `target`.
    ///
    /// A supplied tracking number replaces the current one; `None` leaves it
    /// untouched. `updatedAt` always moves forward. Generates an
    /// `OrderStatusChanged` event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the state machine refuses it.
    pub fn transition_to(
        &mut self,
        target: OrderStatus,
        tracking_number: Option<String>,
        machine: &OrderStateMachine,
    ) -> Result<(), OrderError> {
        machine.validate_transition(self.status, target)?;

        let from = self.status;
        self.status = target;
        if let Some(tracking) = tracking_number {
            self.tracking_number = Some(tracking);
        }
        self.updated_at = Timestamp::now_after(self.updated_at);

        self.events.push(OrderEvent::StatusChanged(OrderStatusChanged {
            order_id: self.id.clone(),
            from,
            to: target,
            tracking_number: self.tracking_number.clone(),
            occurred_at: self.updated_at,
        }));

        Ok(())
    }

    // ========================================================================
    // Event Management
    // ========================================================================

    /// Drain all pending domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pending events without draining.
    #[must_use]
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.events
    }
}
