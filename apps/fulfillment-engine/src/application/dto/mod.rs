//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod invoice_dto;
mod listing_dto;
mod notification_dto;
mod order_dto;
mod product_dto;
mod stats_dto;

pub use invoice_dto::{
    CreateInvoiceRequest, InvoiceDto, InvoiceLineDto, InvoiceLineRequest,
};
pub use listing_dto::{
    FiltersDto, ListOrdersRequest, OrderListing, PaginatedOrders, UserOrdersRequest,
};
pub use notification_dto::{NotificationResponseDto, NotifyOrderRequest};
pub use order_dto::{OrderDto, UpdateOrderStatusRequest};
pub use product_dto::{ProductDto, StockUpdateResponseDto};
pub use stats_dto::{OrderStatsDto, RevenueDto, StatusStatsDto, TopProductDto};
