//! Observability module for logging and metrics.

mod logging;
mod metrics;

pub use self::logging::init_tracing;
pub use self::metrics::{
    MetricsConfig, MetricsError, init_metrics, record_invoice_failure, record_invoice_issued,
    record_order_deleted, record_order_placed, record_placement_failure, record_status_transition,
    record_stock_compensation, record_stock_reservation,
};
