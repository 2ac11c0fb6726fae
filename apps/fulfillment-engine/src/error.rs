//! Error handling for the fulfillment engine.
//!
//! Domain errors are converted into a [`ServiceError`] at the application
//! boundary. Each carries an [`ErrorCode`] that fixes the HTTP status and a
//! list of context pairs that become the `details` map of the response body.
//!
//! | Code | HTTP | Usage |
//! |------|------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed body, query or field |
//! | `INVALID_ORDER_ITEMS` | 400 | Line items failing the validity gate |
//! | `INVALID_STATUS` | 400 | Status outside the lifecycle |
//! | `INVALID_TOTALS` | 400 | Totals that do not add up |
//! | `UNAUTHENTICATED` | 401 | No principal |
//! | `FORBIDDEN` | 403 | Principal lacks the admin role or does not own the record |
//! | `ORDER_NOT_FOUND` | 404 | Unknown `orderId` |
//! | `PRODUCT_NOT_FOUND` | 404 | Unknown product |
//! | `INVOICE_NOT_FOUND` | 404 | Unknown invoice id |
//! | `INSUFFICIENT_STOCK` | 409 | Not enough units on hand |
//! | `DUPLICATE_ORDER_ID` | 409 | `orderId` already taken |
//! | `INVALID_STATE_TRANSITION` | 409 | Transition policy refused |
//! | `INTERNAL_ERROR` | 500 | Anything else; details are never exposed |

use std::collections::HashMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::inventory::InventoryError;
use crate::domain::invoicing::InvoiceError;
use crate::domain::order_fulfillment::{OrderError, OrderStatus};

const INTERNAL_MESSAGE: &str = "Internal server error";
const ITEM_RULES: &str = "All items must have title, valid price > 0, and quantity > 0";

/// Error codes for the fulfillment engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (400)
    /// Invalid request format or missing fields.
    InvalidRequest,
    /// One or more line items are invalid.
    InvalidOrderItems,
    /// Status outside the lifecycle.
    InvalidStatus,
    /// Totals are inconsistent.
    InvalidTotals,

    // Access errors (401/403)
    /// No authenticated principal.
    Unauthenticated,
    /// Principal lacks the required role.
    Forbidden,

    // Not found errors (404)
    /// Order not found.
    OrderNotFound,
    /// Product not found.
    ProductNotFound,
    /// Invoice not found.
    InvoiceNotFound,

    // Conflict errors (409)
    /// Not enough stock.
    InsufficientStock,
    /// Order id already taken.
    DuplicateOrderId,
    /// Transition refused by policy.
    InvalidStateTransition,

    // Internal errors (500)
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest
            | Self::InvalidOrderItems
            | Self::InvalidStatus
            | Self::InvalidTotals => StatusCode::BAD_REQUEST,

            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,

            Self::OrderNotFound | Self::ProductNotFound | Self::InvoiceNotFound => {
                StatusCode::NOT_FOUND
            }

            Self::InsufficientStock | Self::DuplicateOrderId | Self::InvalidStateTransition => {
                StatusCode::CONFLICT
            }

            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidOrderItems => "INVALID_ORDER_ITEMS",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidTotals => "INVALID_TOTALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::InvoiceNotFound => "INVOICE_NOT_FOUND",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::DuplicateOrderId => "DUPLICATE_ORDER_ID",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A service error with context.
#[derive(Debug, Error)]
pub struct ServiceError {
    /// Error code.
    code: ErrorCode,
    /// Human-readable message.
    message: String,
    /// Additional context (key-value pairs).
    context: Vec<(String, String)>,
}

impl ServiceError {
    /// Create a new service error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to an HTTP error body. Internal errors are masked.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        if self.code == ErrorCode::InternalError {
            return HttpErrorResponse {
                code: self.code.reason().to_string(),
                message: INTERNAL_MESSAGE.to_string(),
                details: HashMap::new(),
            };
        }
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    pub details: HashMap<String, String>,
}

/// Convenience constructors for common errors.
impl ServiceError {
    /// Invalid request format.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Missing principal.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(ErrorCode::Unauthenticated, "Authentication required")
    }

    /// Principal lacks the admin role.
    #[must_use]
    pub fn admin_required() -> Self {
        Self::new(ErrorCode::Forbidden, "Require Admin Role!")
    }

    /// Order not found.
    #[must_use]
    pub fn order_not_found(order_id: &str) -> Self {
        Self::new(
            ErrorCode::OrderNotFound,
            format!("Order with ID {order_id} not found"),
        )
        .with_context("orderId", order_id)
    }

    /// Record belongs to another account.
    #[must_use]
    pub fn not_owner() -> Self {
        Self::new(ErrorCode::Forbidden, "Not allowed to view this record")
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<OrderError> for ServiceError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidParameters { field, message } => {
                Self::new(ErrorCode::InvalidRequest, message).with_context("field", field)
            }
            OrderError::InvalidItems { indexes } => {
                let positions = indexes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                Self::new(ErrorCode::InvalidOrderItems, "Invalid items detected")
                    .with_context("details", ITEM_RULES)
                    .with_context("indexes", positions)
            }
            OrderError::InvalidTotals { field, message } => {
                Self::new(ErrorCode::InvalidTotals, message).with_context("field", field)
            }
            OrderError::InvalidStatus { value } => Self::new(
                ErrorCode::InvalidStatus,
                format!(
                    "Invalid status. Must be one of: {}",
                    OrderStatus::ALL
                        .iter()
                        .map(OrderStatus::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )
            .with_context("status", value),
            OrderError::InvalidStateTransition { from, to, reason } => {
                Self::new(ErrorCode::InvalidStateTransition, reason)
                    .with_context("from", from.as_str())
                    .with_context("to", to.as_str())
            }
            OrderError::NotFound { order_id } => Self::order_not_found(&order_id),
            OrderError::DuplicateOrderId { order_id } => Self::new(
                ErrorCode::DuplicateOrderId,
                format!("Order ID {order_id} already exists"),
            )
            .with_context("orderId", order_id),
            OrderError::Storage { message } => Self::internal(message),
        }
    }
}

impl From<InventoryError> for ServiceError {
    fn from(err: InventoryError) -> Self {
        let message = err.to_string();
        match err {
            InventoryError::ProductNotFound { product_id, title } => {
                let error = Self::new(ErrorCode::ProductNotFound, message)
                    .with_context("productId", product_id.as_str());
                match title {
                    Some(title) => error.with_context("title", title),
                    None => error,
                }
            }
            InventoryError::InsufficientStock {
                product_id,
                title,
                requested,
                available,
            } => Self::new(ErrorCode::InsufficientStock, message)
                .with_context("productId", product_id.as_str())
                .with_context("title", title)
                .with_context("requested", requested.to_string())
                .with_context("available", available.to_string()),
            InventoryError::QuantityTooLarge { product_id, title } => {
                Self::new(ErrorCode::InvalidOrderItems, message)
                    .with_context("productId", product_id.as_str())
                    .with_context("title", title)
            }
            InventoryError::InvalidStock { .. } => Self::invalid_request(message),
            InventoryError::Storage { .. } => Self::internal(message),
        }
    }
}

impl From<InvoiceError> for ServiceError {
    fn from(err: InvoiceError) -> Self {
        let message = err.to_string();
        match err {
            InvoiceError::InvalidRequest { field, .. } => {
                Self::new(ErrorCode::InvalidRequest, message).with_context("field", field)
            }
            InvoiceError::AmountTooLarge { field } => {
                Self::new(ErrorCode::InvalidTotals, message).with_context("field", field)
            }
            InvoiceError::NotFound { invoice_id } => {
                Self::new(ErrorCode::InvoiceNotFound, "Invoice not found")
                    .with_context("invoiceId", invoice_id)
            }
            InvoiceError::Storage { .. } => Self::internal(message),
        }
    }
}
