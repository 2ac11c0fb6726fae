//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use super::query::{OrderPage, OrderQuery};
use crate::domain::shared::{OrderId, Timestamp};

/// Change applied to a stored order by [`OrderRepository::update`].
pub type OrderMutation = Box<dyn FnOnce(&mut Order) -> Result<(), OrderError> + Send>;

/// Repository trait for Order persistence, keyed by `orderId`.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order. The uniqueness check and the write are atomic.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateOrderId` if the id is taken, or `Storage` on failure.
    async fn insert(&self, order: &Order) -> Result<(), OrderError>;

    /// Overwrite an existing order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Apply `mutation` to the stored order and write the result back as one
    /// step. Concurrent updates of the same order are serialized, and nothing
    /// is written if the mutation fails. Returns the updated order with the
    /// events the mutation raised.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist, or whatever error the
    /// mutation returned.
    async fn update(&self, id: &OrderId, mutation: OrderMutation) -> Result<Order, OrderError>;

    /// Find an order by its `orderId`.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_order_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Check whether an `orderId` is taken.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn exists(&self, id: &OrderId) -> Result<bool, OrderError>;

    /// Remove an order, returning it if it existed.
    ///
    /// # Errors
    ///
    /// Returns error if the delete fails.
    async fn delete(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// Filter, sort and paginate orders.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn query(&self, query: &OrderQuery) -> Result<OrderPage, OrderError>;

    /// All orders created at or after `since`, or every order for `None`.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_created_since(&self, since: Option<Timestamp>) -> Result<Vec<Order>, OrderError>;
}
