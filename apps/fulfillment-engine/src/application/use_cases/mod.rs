//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod create_invoice;
mod delete_order;
mod notify_order;
mod order_stats;
mod place_order;
mod query_invoices;
mod query_orders;
mod set_product_stock;
mod update_order_status;

pub use create_invoice::CreateInvoiceUseCase;
pub use delete_order::DeleteOrderUseCase;
pub use notify_order::NotifyOrderUseCase;
pub use order_stats::OrderStatsUseCase;
pub use place_order::PlaceOrderUseCase;
pub use query_invoices::QueryInvoicesUseCase;
pub use query_orders::{ListingLimits, QueryOrdersUseCase};
pub use set_product_stock::SetProductStockUseCase;
pub use update_order_status::UpdateOrderStatusUseCase;
