//! Query Orders Use Case
//!
//! Admin and self-service listings plus lookup by id. Parameters arrive as
//! raw strings and are parsed here, so a malformed filter is rejected before
//! the repository is touched.

use std::sync::Arc;

use crate::application::dto::{
    FiltersDto, ListOrdersRequest, OrderDto, OrderListing, PaginatedOrders, UserOrdersRequest,
};
use crate::domain::order_fulfillment::{
    OrderError, OrderFilter, OrderQuery, OrderRepository, OrderSort, OrderStatus, PageInfo,
    PageRequest, PaymentStatus, SortDirection, SortField,
};
use crate::domain::shared::{OrderId, Timestamp, UserId};
use crate::error::ServiceError;

/// Page-size defaults and cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingLimits {
    /// Default page size for the admin listing.
    pub admin_default: u32,
    /// Default page size for a user's own listing.
    pub user_default: u32,
    /// Largest page size honored.
    pub max: u32,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            admin_default: 50,
            user_default: 10,
            max: 200,
        }
    }
}

/// Use case for reading orders.
pub struct QueryOrdersUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
    limits: ListingLimits,
}

impl<O> QueryOrdersUseCase<O>
where
    O: OrderRepository,
{
    /// Create a new QueryOrdersUseCase.
    pub const fn new(order_repo: Arc<O>, limits: ListingLimits) -> Self {
        Self { order_repo, limits }
    }

    /// Admin listing with filters, sorting and optional pagination envelope.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown status, payment status,
    /// sort field or unparseable date.
    pub async fn list_admin(
        &self,
        request: ListOrdersRequest,
    ) -> Result<OrderListing, ServiceError> {
        let filter = OrderFilter {
            status: parse_opt::<OrderStatus>(request.status.as_deref())?,
            payment_status: parse_opt::<PaymentStatus>(request.payment_status.as_deref())?,
            user_id: non_blank(request.user_id.as_deref()).map(UserId::new),
            created_from: date_bound("startDate", request.start_date.as_deref())?,
            created_to: date_bound("endDate", request.end_date.as_deref())?,
            search: non_blank(request.search.as_deref()).map(str::to_string),
        };
        let sort = OrderSort {
            field: parse_opt::<SortField>(request.sort_by.as_deref())?.unwrap_or_default(),
            direction: SortDirection::from_param(request.sort_order.as_deref()),
        };
        let page = self.page_request(
            request.page.as_deref(),
            request.limit.as_deref(),
            self.limits.admin_default,
        );

        let query = OrderQuery { filter, sort, page };
        let result = self.order_repo.query(&query).await?;
        let orders: Vec<OrderDto> = result.orders.iter().map(OrderDto::from_order).collect();

        tracing::debug!(
            total = result.total,
            returned = orders.len(),
            page = page.page(),
            limit = page.limit(),
            "Admin order listing"
        );

        if !request.paginate {
            return Ok(OrderListing::Bare(orders));
        }

        Ok(OrderListing::Page(PaginatedOrders {
            orders,
            pagination: PageInfo::new(page, result.total),
            filters: Some(FiltersDto {
                status: request.status,
                payment_status: request.payment_status,
                user_id: request.user_id,
                start_date: request.start_date,
                end_date: request.end_date,
                search: request.search,
                sort_by: sort.field.to_string(),
                sort_order: match sort.direction {
                    SortDirection::Ascending => "asc".to_string(),
                    SortDirection::Descending => "desc".to_string(),
                },
            }),
        }))
    }

    /// A user's own orders, newest first, always paginated.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown status.
    pub async fn list_for_user(
        &self,
        request: UserOrdersRequest,
    ) -> Result<PaginatedOrders, ServiceError> {
        let mut filter = OrderFilter::for_user(UserId::new(request.user_id));
        filter.status = parse_opt::<OrderStatus>(request.status.as_deref())?;

        let page = self.page_request(
            request.page.as_deref(),
            request.limit.as_deref(),
            self.limits.user_default,
        );
        let query = OrderQuery {
            filter,
            sort: OrderSort::default(),
            page,
        };
        let result = self.order_repo.query(&query).await?;

        Ok(PaginatedOrders {
            orders: result.orders.iter().map(OrderDto::from_order).collect(),
            pagination: PageInfo::new(page, result.total),
            filters: None,
        })
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns `ORDER_NOT_FOUND` if no order has this id.
    pub async fn get(&self, order_id: &OrderId) -> Result<OrderDto, ServiceError> {
        self.order_repo
            .find_by_order_id(order_id)
            .await?
            .map(|order| OrderDto::from_order(&order))
            .ok_or_else(|| ServiceError::order_not_found(order_id.as_str()))
    }

    fn page_request(
        &self,
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u32,
    ) -> PageRequest {
        let page = positive(page).unwrap_or(1);
        let limit = positive(limit).unwrap_or(default_limit).min(self.limits.max);
        PageRequest::new(page, limit)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_opt<T>(raw: Option<&str>) -> Result<Option<T>, OrderError>
where
    T: std::str::FromStr<Err = OrderError>,
{
    non_blank(raw).map(str::parse).transpose()
}

fn date_bound(field: &str, raw: Option<&str>) -> Result<Option<Timestamp>, OrderError> {
    non_blank(raw)
        .map(|s| Timestamp::parse_bound(field, s).map_err(OrderError::from))
        .transpose()
}

fn positive(raw: Option<&str>) -> Option<u32> {
    non_blank(raw)
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|v| *v > 0)
}
