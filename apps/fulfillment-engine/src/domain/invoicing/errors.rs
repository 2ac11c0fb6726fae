//! Invoice errors.

use std::fmt;

use crate::domain::shared::Money;

/// Errors raised while issuing or reading invoices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceError {
    /// The request is missing data or carries a malformed field.
    InvalidRequest {
        /// Offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// A line total or the invoice total is above [`Money::MAX_ORDER_AMOUNT`].
    AmountTooLarge {
        /// Offending figure.
        field: String,
    },

    /// No invoice has this id.
    NotFound {
        /// Requested id.
        invoice_id: String,
    },

    /// Underlying storage failed.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for InvoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest { field, message } => {
                write!(f, "Invalid invoice parameter '{field}': {message}")
            }
            Self::AmountTooLarge { field } => write!(
                f,
                "Invoice {field} exceeds the maximum order amount of {}",
                Money::MAX_ORDER_AMOUNT
            ),
            Self::NotFound { invoice_id } => write!(f, "Invoice {invoice_id} not found"),
            Self::Storage { message } => write!(f, "Invoice storage failure: {message}"),
        }
    }
}

impl std::error::Error for InvoiceError {}
