//! Catalog Port (Driven Port)
//!
//! Interface to the product catalog's stock counters.

use async_trait::async_trait;

use crate::domain::inventory::{DecrementOutcome, Product};
use crate::domain::shared::ProductId;

/// Catalog store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Product does not exist.
    #[error("Product {product_id} not found")]
    NotFound { product_id: ProductId },

    /// Backing store failed.
    #[error("Catalog unavailable: {message}")]
    Unavailable { message: String },
}

/// Port for reading and adjusting product stock.
///
/// `try_decrement` must be atomic per product: the availability check and the
/// write happen as one step, so concurrent callers can never both take the
/// last unit.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Look up a product.
    async fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// Decrement stock by `quantity` only if at least that many are on hand.
    async fn try_decrement(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<DecrementOutcome, CatalogError>;

    /// Add `quantity` units back. Returns the new stock level.
    async fn restock(&self, product_id: &ProductId, quantity: u32) -> Result<u32, CatalogError>;

    /// Overwrite the stock level. Returns the updated product.
    async fn set_stock(&self, product_id: &ProductId, stock: u32) -> Result<Product, CatalogError>;
}
