//! Order Statistics Use Case

use std::sync::Arc;

use chrono::Utc;

use crate::application::dto::OrderStatsDto;
use crate::domain::order_fulfillment::{OrderRepository, OrderStatistics, StatsPeriod};
use crate::error::ServiceError;

/// Use case for the admin statistics report.
pub struct OrderStatsUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> OrderStatsUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new OrderStatsUseCase.
    pub const fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Aggregate orders created within `period`.
    ///
    /// `week`, `month` and `year` narrow the window; anything else covers
    /// all orders. The raw value is echoed in the response.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the repository fails.
    pub async fn execute(&self, period: Option<String>) -> Result<OrderStatsDto, ServiceError> {
        let since = StatsPeriod::from_param(period.as_deref()).since(Utc::now());
        let orders = self.order_repo.find_created_since(since).await?;
        let stats = OrderStatistics::compute(&orders);

        tracing::debug!(
            period = period.as_deref().unwrap_or("all"),
            orders = stats.total_orders,
            "Order statistics computed"
        );

        Ok(OrderStatsDto::new(stats, period))
    }
}
