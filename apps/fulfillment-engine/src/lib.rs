// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Fulfillment Engine - Order Fulfillment and Inventory Library
//!
//! Turns storefront submissions into persisted orders while keeping product
//! stock consistent under concurrent placement.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `order_fulfillment`: Order aggregate, assembly, status lifecycle, queries
//!   - `inventory`: Products, conditional stock decrements, reservations
//!   - `invoicing`: Invoices priced from the catalog
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`CatalogPort`, `NotificationPort`)
//!   - `services`: `InventoryReservationEngine`
//!   - `use_cases`: `PlaceOrder`, `QueryOrders`, `UpdateOrderStatus`, `OrderStats`,
//!     `DeleteOrder`, `NotifyOrder`, `SetProductStock`, `CreateInvoice`, `QueryInvoices`
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `http`: Axum REST API
//!   - `persistence`: In-memory order and invoice repositories, catalog
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting Modules
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Error types and HTTP error mapping.
pub mod error;

/// Logging and metrics.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::inventory::{InventoryError, Product};
pub use domain::invoicing::{Invoice, InvoiceError};
pub use domain::order_fulfillment::{
    LineItem, Order, OrderError, OrderStatus, PaymentMethod, PaymentStatus, RawOrderSubmission,
};
pub use domain::shared::{InvoiceId, Money, OrderId, ProductId, Timestamp, UserId};

// Application re-exports
pub use application::dto::{InvoiceDto, OrderDto, OrderListing, PaginatedOrders};
pub use application::ports::{
    CatalogPort, EventPublisherPort, LoggingNotifier, NoOpEventPublisher, NotificationPort,
    TracingEventPublisher,
};
pub use application::use_cases::{
    CreateInvoiceUseCase, DeleteOrderUseCase, NotifyOrderUseCase, OrderStatsUseCase,
    PlaceOrderUseCase, QueryInvoicesUseCase, QueryOrdersUseCase, SetProductStockUseCase,
    UpdateOrderStatusUseCase,
};

// Infrastructure re-exports
pub use infrastructure::config::{Container, InMemoryContainer};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{
    InMemoryCatalog, InMemoryInvoiceRepository, InMemoryOrderRepository,
};

// Cross-cutting re-exports
pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use error::{ErrorCode, ServiceError};
