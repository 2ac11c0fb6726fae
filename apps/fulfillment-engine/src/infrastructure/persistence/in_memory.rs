//! In-memory order repository.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::order_fulfillment::{
    Order, OrderError, OrderMutation, OrderPage, OrderQuery, OrderRepository,
};
use crate::domain::shared::{OrderId, Timestamp};

/// In-memory implementation of `OrderRepository`.
///
/// The `orderId` uniqueness check and the insert happen under one write
/// lock, as does every read-modify-write in `update`. Stored copies never
/// carry pending events. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of orders in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        match orders.entry(order.id().clone()) {
            Entry::Occupied(_) => Err(OrderError::DuplicateOrderId {
                order_id: order.id().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(without_events(order));
                Ok(())
            }
        }
    }

    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        match orders.get_mut(order.id()) {
            Some(stored) => {
                *stored = without_events(order);
                Ok(())
            }
            None => Err(OrderError::NotFound {
                order_id: order.id().to_string(),
            }),
        }
    }

    async fn update(&self, id: &OrderId, mutation: OrderMutation) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let stored = orders.get_mut(id).ok_or_else(|| OrderError::NotFound {
            order_id: id.to_string(),
        })?;

        let mut updated = stored.clone();
        mutation(&mut updated)?;
        *stored = without_events(&updated);
        Ok(updated)
    }

    async fn find_by_order_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.get(id).cloned())
    }

    async fn exists(&self, id: &OrderId) -> Result<bool, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.contains_key(id))
    }

    async fn delete(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        Ok(orders.remove(id))
    }

    async fn query(&self, query: &OrderQuery) -> Result<OrderPage, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        let mut matching: Vec<&Order> = orders
            .values()
            .filter(|o| query.filter.matches(o))
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(query.page.offset())
            .take(query.page.limit() as usize)
            .cloned()
            .collect();

        Ok(OrderPage {
            orders: page,
            total,
        })
    }

    async fn find_created_since(&self, since: Option<Timestamp>) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        Ok(orders
            .values()
            .filter(|o| since.is_none_or(|from| o.created_at() >= from))
            .cloned()
            .collect())
    }
}

fn without_events(order: &Order) -> Order {
    let mut stored = order.clone();
    stored.drain_events();
    stored
}
