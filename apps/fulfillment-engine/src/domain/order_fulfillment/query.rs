//! Order listing criteria: filters, sort keys and offset pagination.
//!
//! Repositories receive an [`OrderQuery`] and must honor it exactly: filter
//! with AND across dimensions, sort with a stable `orderId` tie-break, then
//! cut the requested page.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::{OrderStatus, PaymentStatus};
use crate::domain::shared::{Timestamp, UserId};

/// Filter dimensions for order listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Exact lifecycle status.
    pub status: Option<OrderStatus>,
    /// Exact payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Owning account.
    pub user_id: Option<UserId>,
    /// Inclusive lower bound on `createdAt`.
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on `createdAt`.
    pub created_to: Option<Timestamp>,
    /// Case-insensitive substring over order id, email, first and last name.
    pub search: Option<String>,
}

impl OrderFilter {
    /// Filter on a single account's orders.
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Returns true if the order satisfies every set dimension.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status()) {
            return false;
        }
        if self
            .payment_status
            .is_some_and(|s| s != order.payment_status())
        {
            return false;
        }
        if self.user_id.as_ref().is_some_and(|u| u != order.user_id()) {
            return false;
        }
        if self.created_from.is_some_and(|from| order.created_at() < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| order.created_at() > to) {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(needle) if !needle.is_empty() => order.matches_search(&needle),
            _ => true,
        }
    }
}

/// Fields an order listing can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Creation time.
    #[default]
    CreatedAt,
    /// Last mutation time.
    UpdatedAt,
    /// Order date.
    OrderDate,
    /// Grand total.
    Total,
    /// Subtotal.
    Subtotal,
    /// Human-facing id.
    OrderId,
    /// Lifecycle status.
    Status,
    /// Payment status.
    PaymentStatus,
}

impl SortField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::OrderDate => "orderDate",
            Self::Total => "total",
            Self::Subtotal => "subtotal",
            Self::OrderId => "orderId",
            Self::Status => "status",
            Self::PaymentStatus => "paymentStatus",
        }
    }

    fn compare(self, a: &Order, b: &Order) -> Ordering {
        match self {
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
            Self::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
            Self::OrderDate => a.order_date().cmp(&b.order_date()),
            Self::Total => a.totals().total.cmp(&b.totals().total),
            Self::Subtotal => a.totals().subtotal.cmp(&b.totals().subtotal),
            Self::OrderId => a.id().cmp(b.id()),
            Self::Status => a.status().as_str().cmp(b.status().as_str()),
            Self::PaymentStatus => a
                .payment_status()
                .as_str()
                .cmp(b.payment_status().as_str()),
        }
    }
}

impl FromStr for SortField {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::CreatedAt,
            Self::UpdatedAt,
            Self::OrderDate,
            Self::Total,
            Self::Subtotal,
            Self::OrderId,
            Self::Status,
            Self::PaymentStatus,
        ]
        .into_iter()
        .find(|f| f.as_str() == s)
        .ok_or_else(|| OrderError::InvalidParameters {
            field: "sortBy".to_string(),
            message: format!("cannot sort by '{s}'"),
        })
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// `asc` sorts ascending; anything else sorts descending.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => Self::Ascending,
            _ => Self::Descending,
        }
    }
}

/// Sort specification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderSort {
    /// Field to sort on.
    pub field: SortField,
    /// Direction.
    pub direction: SortDirection,
}

impl OrderSort {
    /// Total order over orders: the requested field, then `orderId` ascending.
    #[must_use]
    pub fn compare(&self, a: &Order, b: &Order) -> Ordering {
        let primary = match self.direction {
            SortDirection::Ascending => self.field.compare(a, b),
            SortDirection::Descending => self.field.compare(b, a),
        };
        primary.then_with(|| a.id().cmp(b.id()))
    }
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request. Zero values are raised to 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum items per page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip.
    #[must_use]
    pub fn offset(&self) -> usize {
        (u64::from(self.page - 1) * u64::from(self.limit))
            .try_into()
            .unwrap_or(usize::MAX)
    }
}

/// Pagination metadata derived from the total match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Requested page.
    pub current_page: u32,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
    /// Total matches across all pages.
    pub total_orders: u64,
    /// `page * limit < total`.
    pub has_next: bool,
    /// `page > 1`.
    pub has_prev: bool,
}

impl PageInfo {
    /// Compute metadata for `request` over `total` matches.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        let limit = u64::from(request.limit());
        let page = u64::from(request.page());
        Self {
            current_page: request.page(),
            total_pages: total.div_ceil(limit),
            total_orders: total,
            has_next: page * limit < total,
            has_prev: page > 1,
        }
    }
}

/// A full listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    /// Filter dimensions.
    pub filter: OrderFilter,
    /// Sort order.
    pub sort: OrderSort,
    /// Page to return.
    pub page: PageRequest,
}

/// One page of matching orders plus the total match count.
#[derive(Debug, Clone)]
pub struct OrderPage {
    /// Orders on this page.
    pub orders: Vec<Order>,
    /// Matches across all pages.
    pub total: u64,
}
