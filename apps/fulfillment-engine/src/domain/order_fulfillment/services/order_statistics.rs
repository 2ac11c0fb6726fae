//! Order statistics over a reporting window.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::order_fulfillment::aggregate::Order;
use crate::domain::order_fulfillment::value_objects::OrderStatus;
use crate::domain::shared::{Money, Timestamp};

const TOP_PRODUCTS: usize = 5;

/// Reporting window for statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatsPeriod {
    /// The last seven days.
    Week,
    /// Since the first of the current month.
    Month,
    /// Since January 1st.
    Year,
    /// Everything.
    #[default]
    AllTime,
}

impl StatsPeriod {
    /// Parse a `period` parameter. Unrecognized values mean all time.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("week") => Self::Week,
            Some("month") => Self::Month,
            Some("year") => Self::Year,
            _ => Self::AllTime,
        }
    }

    /// Inclusive lower bound on `createdAt`, or `None` for all time.
    #[must_use]
    pub fn since(&self, now: DateTime<Utc>) -> Option<Timestamp> {
        let start = match self {
            Self::Week => now - Duration::days(7),
            Self::Month => Utc
                .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
                .single()?,
            Self::Year => Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).single()?,
            Self::AllTime => return None,
        };
        Some(Timestamp::new(start))
    }
}

/// Order count and revenue for one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBreakdown {
    /// Status.
    pub status: OrderStatus,
    /// Orders in this status.
    pub count: u64,
    /// Σ total for those orders.
    pub total_revenue: Money,
}

/// Units and revenue for one product title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSales {
    /// Line item title.
    pub title: String,
    /// Units sold.
    pub total_quantity: u64,
    /// Σ price × quantity.
    pub total_revenue: Money,
}

/// Aggregated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatistics {
    /// Orders in the window.
    pub total_orders: u64,
    /// Breakdown by status, in lifecycle order, omitting empty statuses.
    pub by_status: Vec<StatusBreakdown>,
    /// Σ total.
    pub total_revenue: Money,
    /// Mean total, zero with no orders.
    pub average_order_value: Money,
    /// Σ quantity across all lines.
    pub total_items: u64,
    /// Best sellers by units, then title ascending.
    pub top_products: Vec<ProductSales>,
}

impl OrderStatistics {
    /// Aggregate the given orders.
    #[must_use]
    pub fn compute(orders: &[Order]) -> Self {
        let total_orders = orders.len() as u64;
        let total_revenue = revenue_of(orders.iter());
        let total_items = orders.iter().map(Order::item_count).sum();

        let average_order_value = if total_orders == 0 {
            Money::ZERO
        } else {
            Money::new(total_revenue.amount() / Decimal::from(total_orders)).round()
        };

        let by_status = OrderStatus::ALL
            .into_iter()
            .filter_map(|status| {
                let matching: Vec<&Order> =
                    orders.iter().filter(|o| o.status() == status).collect();
                (!matching.is_empty()).then(|| StatusBreakdown {
                    status,
                    count: matching.len() as u64,
                    total_revenue: revenue_of(matching.iter().copied()),
                })
            })
            .collect();

        let mut sales: HashMap<&str, (u64, Money)> = HashMap::new();
        for item in orders.iter().flat_map(Order::items) {
            let entry = sales.entry(item.title()).or_insert((0, Money::ZERO));
            entry.0 += u64::from(item.quantity());
            entry.1 = entry.1.saturating_add(item.price().saturating_mul(item.quantity()));
        }
        let mut top_products: Vec<ProductSales> = sales
            .into_iter()
            .map(|(title, (total_quantity, total_revenue))| ProductSales {
                title: title.to_string(),
                total_quantity,
                total_revenue,
            })
            .collect();
        top_products.sort_by(|a, b| {
            b.total_quantity
                .cmp(&a.total_quantity)
                .then_with(|| a.title.cmp(&b.title))
        });
        top_products.truncate(TOP_PRODUCTS);

        Self {
            total_orders,
            by_status,
            total_revenue,
            average_order_value,
            total_items,
            top_products,
        }
    }
}

/// Revenue clamps instead of overflowing so one oversized stored order
/// cannot fail the report.
fn revenue_of<'a>(orders: impl Iterator<Item = &'a Order>) -> Money {
    orders
        .map(|o| o.totals().total)
        .fold(Money::ZERO, Money::saturating_add)
}
