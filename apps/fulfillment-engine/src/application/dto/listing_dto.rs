//! Order listing DTOs.

use serde::Serialize;

use super::OrderDto;
use crate::domain::order_fulfillment::PageInfo;

/// Admin listing request with every parameter still in raw form.
#[derive(Debug, Clone, Default)]
pub struct ListOrdersRequest {
    /// Exact status filter.
    pub status: Option<String>,
    /// Exact payment status filter.
    pub payment_status: Option<String>,
    /// Owning account filter.
    pub user_id: Option<String>,
    /// Inclusive lower bound on `createdAt`.
    pub start_date: Option<String>,
    /// Inclusive upper bound on `createdAt`.
    pub end_date: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Sort field name.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// One-based page.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Wrap the result in the pagination envelope.
    pub paginate: bool,
}

/// A user's own listing request.
#[derive(Debug, Clone, Default)]
pub struct UserOrdersRequest {
    /// Account whose orders to list.
    pub user_id: String,
    /// Optional status filter.
    pub status: Option<String>,
    /// One-based page.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
}

/// Filters echoed back on the admin listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersDto {
    /// Status filter.
    pub status: Option<String>,
    /// Payment status filter.
    pub payment_status: Option<String>,
    /// Account filter.
    pub user_id: Option<String>,
    /// Range start.
    pub start_date: Option<String>,
    /// Range end.
    pub end_date: Option<String>,
    /// Search text.
    pub search: Option<String>,
    /// Effective sort field.
    pub sort_by: String,
    /// Effective sort direction.
    pub sort_order: String,
}

/// One page of orders with pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedOrders {
    /// Orders on this page.
    pub orders: Vec<OrderDto>,
    /// Page metadata.
    pub pagination: PageInfo,
    /// Applied filters, admin listing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FiltersDto>,
}

/// Listing result: a bare array or the pagination envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OrderListing {
    /// Page slice without metadata.
    Bare(Vec<OrderDto>),
    /// Page slice with metadata.
    Page(PaginatedOrders),
}
