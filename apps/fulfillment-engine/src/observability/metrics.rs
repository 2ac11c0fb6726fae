//! Prometheus metrics for the fulfillment engine.
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! [`init_metrics`] installs the exporter.
//!
//! # Example
//!
//! ```ignore
//! use fulfillment_engine::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_order_placed(0.004);
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    #[allow(clippy::expect_used)] // Literal address; parse cannot fail
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9090".parse().expect("valid default address"),
            // 100us to 1s
            latency_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Order Placement Metrics
// ============================================================================

/// Record a successful placement and its end-to-end latency.
pub fn record_order_placed(latency_seconds: f64) {
    counter!("orders_placed_total").increment(1);
    histogram!("order_placement_seconds").record(latency_seconds);
}

/// Record a failed placement.
///
/// # Arguments
///
/// * `reason` - Error code, e.g. `"INSUFFICIENT_STOCK"`
pub fn record_placement_failure(reason: &str) {
    counter!(
        "order_placement_failures_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

// ============================================================================
// Invoice Metrics
// ============================================================================

/// Record an issued invoice and its end-to-end latency.
pub fn record_invoice_issued(latency_seconds: f64) {
    counter!("invoices_issued_total").increment(1);
    histogram!("invoice_issue_seconds").record(latency_seconds);
}

/// Record a refused or failed invoice.
///
/// # Arguments
///
/// * `reason` - `"validation"`, `"product"`, `"stock"` or `"storage"`
pub fn record_invoice_failure(reason: &str) {
    counter!(
        "invoice_failures_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

// ============================================================================
// Inventory Metrics
// ============================================================================

/// Record one conditional decrement attempt.
///
/// # Arguments
///
/// * `outcome` - `"applied"`, `"insufficient"`, `"not_found"` or `"error"`
pub fn record_stock_reservation(outcome: &str) {
    counter!(
        "stock_reservations_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record one compensating restock.
///
/// # Arguments
///
/// * `result` - `"restored"` or `"failed"`
pub fn record_stock_compensation(result: &str) {
    counter!(
        "stock_compensations_total",
        "result" => result.to_string()
    )
    .increment(1);
}

// ============================================================================
// Lifecycle Metrics
// ============================================================================

/// Record a status change.
pub fn record_status_transition(to: &str) {
    counter!(
        "order_status_transitions_total",
        "to" => to.to_string()
    )
    .increment(1);
}

/// Record an order deletion.
pub fn record_order_deleted() {
    counter!("orders_deleted_total").increment(1);
}
