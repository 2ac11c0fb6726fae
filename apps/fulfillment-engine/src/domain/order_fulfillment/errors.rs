//! Order fulfillment errors.

use std::fmt;

use super::value_objects::OrderStatus;
use crate::domain::shared::{DomainError, Money};

/// Errors that can occur while assembling, transitioning or storing orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A required field is missing or malformed.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// One or more line items failed the post-coercion validity gate.
    InvalidItems {
        /// Zero-based positions of the rejected items.
        indexes: Vec<usize>,
    },

    /// Totals do not add up.
    InvalidTotals {
        /// Field that disagrees with the computed value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Requested status is not one of the lifecycle states.
    InvalidStatus {
        /// The raw value supplied by the caller.
        value: String,
    },

    /// Transition rejected by the configured transition policy.
    InvalidStateTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Order not found.
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Duplicate order ID.
    DuplicateOrderId {
        /// Order ID.
        order_id: String,
    },

    /// Underlying storage failed.
    Storage {
        /// Error message.
        message: String,
    },
}

impl OrderError {
    /// A monetary figure is above [`Money::MAX_ORDER_AMOUNT`] or does not
    /// fit at all.
    #[must_use]
    pub fn amount_too_large(field: &str) -> Self {
        Self::InvalidTotals {
            field: field.to_string(),
            message: format!(
                "exceeds the maximum order amount of {}",
                Money::MAX_ORDER_AMOUNT
            ),
        }
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        Self::InvalidParameters {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::InvalidItems { indexes } => {
                write!(
                    f,
                    "Invalid items detected at positions {indexes:?}: all items must have title, valid price > 0, and quantity > 0"
                )
            }
            Self::InvalidTotals { field, message } => {
                write!(f, "Inconsistent order totals ({field}): {message}")
            }
            Self::InvalidStatus { value } => {
                write!(
                    f,
                    "Invalid status '{value}'. Must be one of: {}",
                    OrderStatus::ALL
                        .iter()
                        .map(OrderStatus::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Invalid order state transition: {from} -> {to}: {reason}")
            }
            Self::NotFound { order_id } => {
                write!(f, "Order with ID {order_id} not found")
            }
            Self::DuplicateOrderId { order_id } => {
                write!(f, "Duplicate order ID: {order_id}")
            }
            Self::Storage { message } => {
                write!(f, "Order storage failure: {message}")
            }
        }
    }
}

impl std::error::Error for OrderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_status_lists_all_states() {
        let err = OrderError::InvalidStatus {
            value: "lost".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("lost"));
        assert!(msg.contains("pending, processing, shipped, delivered, cancelled, returned"));
    }

    #[test]
    fn invalid_items_names_positions() {
        let err = OrderError::InvalidItems {
            indexes: vec![0, 2],
        };
        assert!(err.to_string().contains("[0, 2]"));
    }

    #[test]
    fn not_found_display() {
        let err = OrderError::NotFound {
            order_id: "ORD-1".to_string(),
        };
        assert_eq!(err.to_string(), "Order with ID ORD-1 not found");
    }

    #[test]
    fn domain_error_converts_to_invalid_parameters() {
        let err: OrderError = DomainError::InvalidValue {
            field: "tax".to_string(),
            message: "cannot be negative".to_string(),
        }
        .into();
        assert!(matches!(err, OrderError::InvalidParameters { ref field, .. } if field == "tax"));
    }

    #[test]
    fn order_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(OrderError::DuplicateOrderId {
            order_id: "ORD-1".to_string(),
        });
        assert!(err.to_string().contains("ORD-1"));
    }
}
