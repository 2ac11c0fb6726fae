//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::{
    CatalogPort, EventPublisherPort, LoggingNotifier, NotificationPort, TracingEventPublisher,
};
use crate::application::use_cases::{
    CreateInvoiceUseCase, DeleteOrderUseCase, ListingLimits, NotifyOrderUseCase,
    OrderStatsUseCase, PlaceOrderUseCase, QueryInvoicesUseCase, QueryOrdersUseCase,
    SetProductStockUseCase, UpdateOrderStatusUseCase,
};
use crate::config::{Config, OrdersConfig};
use crate::domain::invoicing::InvoiceRepository;
use crate::domain::order_fulfillment::{OrderRepository, OrderStateMachine};
use crate::infrastructure::http::AppState;
use crate::infrastructure::persistence::{
    InMemoryCatalog, InMemoryInvoiceRepository, InMemoryOrderRepository,
};

/// Container wired with the in-memory adapters used by the binary.
pub type InMemoryContainer = Container<
    InMemoryOrderRepository,
    InMemoryCatalog,
    TracingEventPublisher,
    LoggingNotifier,
    InMemoryInvoiceRepository,
>;

/// Dependency injection container.
///
/// Holds the port implementations and order settings, and builds use cases
/// from them.
pub struct Container<O, C, E, N, I>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    // Ports
    order_repo: Arc<O>,
    catalog: Arc<C>,
    event_publisher: Arc<E>,
    notifier: Arc<N>,
    invoice_repo: Arc<I>,
    // Settings
    orders: OrdersConfig,
}

impl<O, C, E, N, I> Container<O, C, E, N, I>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    /// Create a new container with all dependencies.
    pub const fn new(
        order_repo: Arc<O>,
        catalog: Arc<C>,
        event_publisher: Arc<E>,
        notifier: Arc<N>,
        invoice_repo: Arc<I>,
        orders: OrdersConfig,
    ) -> Self {
        Self {
            order_repo,
            catalog,
            event_publisher,
            notifier,
            invoice_repo,
            orders,
        }
    }

    /// Get the order repository.
    pub fn order_repo(&self) -> Arc<O> {
        Arc::clone(&self.order_repo)
    }

    /// Get the catalog port.
    pub fn catalog(&self) -> Arc<C> {
        Arc::clone(&self.catalog)
    }

    /// Page-size limits from the order settings.
    pub const fn listing_limits(&self) -> ListingLimits {
        ListingLimits {
            admin_default: self.orders.admin_page_limit,
            user_default: self.orders.user_page_limit,
            max: self.orders.max_page_limit,
        }
    }

    /// Create a `PlaceOrderUseCase`.
    pub fn place_order_use_case(&self) -> PlaceOrderUseCase<O, C, E> {
        PlaceOrderUseCase::new(
            Arc::clone(&self.order_repo),
            Arc::clone(&self.catalog),
            Arc::clone(&self.event_publisher),
            self.orders.assembly_policy(),
        )
    }

    /// Create a `QueryOrdersUseCase`.
    pub fn query_orders_use_case(&self) -> QueryOrdersUseCase<O> {
        QueryOrdersUseCase::new(Arc::clone(&self.order_repo), self.listing_limits())
    }

    /// Create an `UpdateOrderStatusUseCase`.
    pub fn update_order_status_use_case(&self) -> UpdateOrderStatusUseCase<O, E> {
        UpdateOrderStatusUseCase::new(
            Arc::clone(&self.order_repo),
            Arc::clone(&self.event_publisher),
            OrderStateMachine::from_kind(self.orders.transition_policy),
        )
    }

    /// Create an `OrderStatsUseCase`.
    pub fn order_stats_use_case(&self) -> OrderStatsUseCase<O> {
        OrderStatsUseCase::new(Arc::clone(&self.order_repo))
    }

    /// Create a `DeleteOrderUseCase`.
    pub fn delete_order_use_case(&self) -> DeleteOrderUseCase<O, E> {
        DeleteOrderUseCase::new(
            Arc::clone(&self.order_repo),
            Arc::clone(&self.event_publisher),
        )
    }

    /// Create a `NotifyOrderUseCase`.
    pub fn notify_order_use_case(&self) -> NotifyOrderUseCase<O, N> {
        NotifyOrderUseCase::new(Arc::clone(&self.order_repo), Arc::clone(&self.notifier))
    }

    /// Create a `SetProductStockUseCase`.
    pub fn set_product_stock_use_case(&self) -> SetProductStockUseCase<C> {
        SetProductStockUseCase::new(Arc::clone(&self.catalog))
    }

    /// Create a `CreateInvoiceUseCase`.
    pub fn create_invoice_use_case(&self) -> CreateInvoiceUseCase<I, C> {
        CreateInvoiceUseCase::new(Arc::clone(&self.invoice_repo), Arc::clone(&self.catalog))
    }

    /// Create a `QueryInvoicesUseCase`.
    pub fn query_invoices_use_case(&self) -> QueryInvoicesUseCase<I> {
        QueryInvoicesUseCase::new(Arc::clone(&self.invoice_repo))
    }

    /// Build the HTTP state from fresh use cases.
    pub fn app_state(&self, version: impl Into<String>) -> AppState<O, C, E, N, I> {
        AppState {
            place_order: Arc::new(self.place_order_use_case()),
            query_orders: Arc::new(self.query_orders_use_case()),
            update_status: Arc::new(self.update_order_status_use_case()),
            order_stats: Arc::new(self.order_stats_use_case()),
            delete_order: Arc::new(self.delete_order_use_case()),
            notify_order: Arc::new(self.notify_order_use_case()),
            set_stock: Arc::new(self.set_product_stock_use_case()),
            create_invoice: Arc::new(self.create_invoice_use_case()),
            query_invoices: Arc::new(self.query_invoices_use_case()),
            version: version.into(),
        }
    }
}

impl InMemoryContainer {
    /// Wire the in-memory adapters, seeding the catalog from configuration.
    #[must_use]
    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryCatalog::from_seed(&config.catalog)),
            Arc::new(TracingEventPublisher),
            Arc::new(LoggingNotifier),
            Arc::new(InMemoryInvoiceRepository::new()),
            config.orders.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_string;

    #[test]
    fn in_memory_container_seeds_catalog_and_limits() {
        let config = load_config_from_string(
            r"
orders:
  admin_page_limit: 25
catalog:
  products:
    - id: p1
      title: Monitor A
      price: 200
      stock: 5
",
        )
        .unwrap();

        let container = InMemoryContainer::in_memory(&config);
        assert_eq!(container.catalog().len(), 1);
        assert_eq!(container.listing_limits().admin_default, 25);
        assert_eq!(container.listing_limits().max, 200);
        assert!(container.order_repo().is_empty());
    }
}
