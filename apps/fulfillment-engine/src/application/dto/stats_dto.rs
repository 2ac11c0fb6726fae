//! Order statistics DTOs.

use serde::Serialize;

use crate::domain::order_fulfillment::{OrderStatistics, OrderStatus};
use crate::domain::shared::Money;

/// Statistics response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatsDto {
    /// Orders in the window.
    pub total_orders: u64,
    /// Per-status breakdown.
    pub orders_by_status: Vec<StatusStatsDto>,
    /// Revenue summary.
    pub revenue: RevenueDto,
    /// Best sellers.
    pub top_products: Vec<TopProductDto>,
    /// Requested period, echoed back.
    pub period: Option<String>,
}

/// Count and revenue for one status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStatsDto {
    /// Status.
    pub status: OrderStatus,
    /// Orders.
    pub count: u64,
    /// Σ total.
    pub total_revenue: Money,
}

/// Revenue summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDto {
    /// Σ total.
    pub total_revenue: Money,
    /// Mean total.
    pub average_order_value: Money,
    /// Σ quantity.
    pub total_items: u64,
}

/// Units and revenue for one title.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProductDto {
    /// Line item title.
    pub title: String,
    /// Units sold.
    pub total_quantity: u64,
    /// Σ price × quantity.
    pub total_revenue: Money,
}

impl OrderStatsDto {
    /// Build from computed statistics.
    #[must_use]
    pub fn new(stats: OrderStatistics, period: Option<String>) -> Self {
        Self {
            total_orders: stats.total_orders,
            orders_by_status: stats
                .by_status
                .into_iter()
                .map(|s| StatusStatsDto {
                    status: s.status,
                    count: s.count,
                    total_revenue: s.total_revenue,
                })
                .collect(),
            revenue: RevenueDto {
                total_revenue: stats.total_revenue,
                average_order_value: stats.average_order_value,
                total_items: stats.total_items,
            },
            top_products: stats
                .top_products
                .into_iter()
                .map(|p| TopProductDto {
                    title: p.title,
                    total_quantity: p.total_quantity,
                    total_revenue: p.total_revenue,
                })
                .collect(),
            period,
        }
    }
}
