//! Inventory errors.

use std::fmt;

use crate::domain::shared::ProductId;

/// Errors raised while reserving or administering stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A stock-tracked line references a product the catalog does not know.
    ProductNotFound {
        /// Referenced product.
        product_id: ProductId,
        /// Line item title, if the lookup came from an order.
        title: Option<String>,
    },

    /// Not enough units on hand.
    InsufficientStock {
        /// Product.
        product_id: ProductId,
        /// Line item title.
        title: String,
        /// Units requested.
        requested: u32,
        /// Units on hand when the decrement was attempted.
        available: u32,
    },

    /// Lines for one product ask for more units than a stock counter holds.
    QuantityTooLarge {
        /// Product.
        product_id: ProductId,
        /// Title of the first line for the product.
        title: String,
    },

    /// An administrative stock value was rejected.
    InvalidStock {
        /// Error message.
        message: String,
    },

    /// The catalog store failed.
    Storage {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductNotFound {
                product_id,
                title: Some(title),
            } => write!(f, "Product not found for item '{title}' ({product_id})"),
            Self::ProductNotFound {
                product_id,
                title: None,
            } => write!(f, "Product {product_id} not found"),
            Self::InsufficientStock {
                title,
                requested,
                available,
                ..
            } => write!(
                f,
                "Insufficient stock for '{title}': requested {requested}, available {available}"
            ),
            Self::QuantityTooLarge { title, .. } => write!(
                f,
                "Requested quantity for '{title}' exceeds {} units",
                u32::MAX
            ),
            Self::InvalidStock { message } => write!(f, "{message}"),
            Self::Storage { message } => write!(f, "Catalog storage failure: {message}"),
        }
    }
}

impl std::error::Error for InventoryError {}
