//! Inventory Reservation Engine
//!
//! Takes stock for every tracked line of an order, or none of it. Each
//! decrement is conditional and atomic in the catalog; applied decrements are
//! recorded so they can be compensated if a later line or the order write
//! fails.

use std::sync::Arc;

use crate::application::ports::{CatalogError, CatalogPort};
use crate::domain::inventory::{DecrementOutcome, InventoryError, Reservation, StockRequest};
use crate::domain::order_fulfillment::LineItem;
use crate::observability::{record_stock_compensation, record_stock_reservation};

/// Reserves and releases stock for orders.
pub struct InventoryReservationEngine<C>
where
    C: CatalogPort,
{
    catalog: Arc<C>,
}

impl<C> InventoryReservationEngine<C>
where
    C: CatalogPort,
{
    /// Create a new engine.
    pub const fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Reserve stock for every stock-tracked line.
    ///
    /// Lines for the same product are merged into one decrement. On the first
    /// failure every decrement already applied is restocked before the error
    /// is returned.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if a referenced product does not exist
    /// - `InsufficientStock` if a product has fewer units than requested
    /// - `Storage` if the catalog fails
    pub async fn reserve(&self, items: &[LineItem]) -> Result<Reservation, InventoryError> {
        let mut reservation = Reservation::new();

        for request in StockRequest::from_line_items(items)? {
            let outcome = self
                .catalog
                .try_decrement(&request.product_id, request.quantity)
                .await;

            let failure = match outcome {
                Ok(DecrementOutcome::Applied { remaining }) => {
                    record_stock_reservation("applied");
                    tracing::debug!(
                        product_id = %request.product_id,
                        quantity = request.quantity,
                        remaining,
                        "Stock reserved"
                    );
                    reservation.record(request.product_id, request.quantity);
                    continue;
                }
                Ok(DecrementOutcome::Insufficient { available }) => {
                    record_stock_reservation("insufficient");
                    tracing::warn!(
                        product_id = %request.product_id,
                        title = %request.title,
                        requested = request.quantity,
                        available,
                        "Insufficient stock"
                    );
                    InventoryError::InsufficientStock {
                        product_id: request.product_id,
                        title: request.title,
                        requested: request.quantity,
                        available,
                    }
                }
                Ok(DecrementOutcome::NotFound) | Err(CatalogError::NotFound { .. }) => {
                    record_stock_reservation("not_found");
                    tracing::warn!(
                        product_id = %request.product_id,
                        title = %request.title,
                        "Product not found"
                    );
                    InventoryError::ProductNotFound {
                        product_id: request.product_id,
                        title: Some(request.title),
                    }
                }
                Err(e @ CatalogError::Unavailable { .. }) => {
                    record_stock_reservation("error");
                    tracing::error!(
                        product_id = %request.product_id,
                        error = %e,
                        "Catalog failed during reservation"
                    );
                    InventoryError::Storage {
                        message: e.to_string(),
                    }
                }
            };

            self.release(&reservation).await;
            return Err(failure);
        }

        Ok(reservation)
    }

    /// Restock every entry of a reservation.
    ///
    /// Returns the number of entries that could not be restored. Failures
    /// are logged and counted but do not stop the remaining entries.
    pub async fn release(&self, reservation: &Reservation) -> usize {
        let mut failed = 0;

        for entry in reservation.entries() {
            match self.catalog.restock(&entry.product_id, entry.quantity).await {
                Ok(stock) => {
                    record_stock_compensation("restored");
                    tracing::info!(
                        product_id = %entry.product_id,
                        quantity = entry.quantity,
                        stock,
                        "Stock compensated"
                    );
                }
                Err(e) => {
                    failed += 1;
                    record_stock_compensation("failed");
                    tracing::error!(
                        product_id = %entry.product_id,
                        quantity = entry.quantity,
                        error = %e,
                        "Stock compensation failed"
                    );
                }
            }
        }

        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{Money, ProductId};
    use crate::infrastructure::persistence::InMemoryCatalog;
    use crate::domain::inventory::Product;

    fn catalog() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::with_products(vec![
            Product::new(ProductId::new("p1"), "Monitor A", "", Money::from_cents(10_000), 5),
            Product::new(ProductId::new("p2"), "Cable", "", Money::from_cents(500), 1),
        ]))
    }

    fn line(product: &str, qty: u32) -> LineItem {
        LineItem::new(product, Money::from_cents(100), qty, Some(ProductId::new(product)))
    }

    #[tokio::test]
    async fn reserves_every_tracked_line() {
        let catalog = catalog();
        let engine = InventoryReservationEngine::new(Arc::clone(&catalog));
        let untracked = LineItem::new("Gift card", Money::from_cents(100), 3, None);

        let reservation = engine
            .reserve(&[line("p1", 2), untracked, line("p2", 1)])
            .await
            .unwrap();

        assert_eq!(reservation.total_units(), 3);
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(3));
        assert_eq!(catalog.stock_of(&ProductId::new("p2")), Some(0));
    }

    #[tokio::test]
    async fn insufficient_stock_compensates_earlier_lines() {
        let catalog = catalog();
        let engine = InventoryReservationEngine::new(Arc::clone(&catalog));

        let err = engine
            .reserve(&[line("p1", 2), line("p2", 2)])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                product_id: ProductId::new("p2"),
                title: "p2".to_string(),
                requested: 2,
                available: 1,
            }
        );
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(5));
        assert_eq!(catalog.stock_of(&ProductId::new("p2")), Some(1));
    }

    #[tokio::test]
    async fn unknown_product_compensates_and_reports_title() {
        let catalog = catalog();
        let engine = InventoryReservationEngine::new(Arc::clone(&catalog));

        let err = engine
            .reserve(&[line("p1", 1), line("ghost", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, InventoryError::ProductNotFound { ref title, .. } if title.as_deref() == Some("ghost")));
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(5));
    }

    #[tokio::test]
    async fn merged_lines_are_checked_together() {
        let catalog = catalog();
        let engine = InventoryReservationEngine::new(Arc::clone(&catalog));

        let err = engine
            .reserve(&[line("p1", 3), line("p1", 3)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InventoryError::InsufficientStock {
                requested: 6,
                available: 5,
                ..
            }
        ));
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(5));
    }

    #[tokio::test]
    async fn merged_lines_that_overflow_take_nothing() {
        let catalog = Arc::new(InMemoryCatalog::with_products(vec![Product::new(
            ProductId::new("p1"),
            "Monitor A",
            "",
            Money::from_cents(10_000),
            u32::MAX,
        )]));
        let engine = InventoryReservationEngine::new(Arc::clone(&catalog));

        let err = engine
            .reserve(&[line("p1", u32::MAX), line("p1", 2)])
            .await
            .unwrap_err();

        assert!(matches!(err, InventoryError::QuantityTooLarge { .. }));
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(u32::MAX));
    }

    #[tokio::test]
    async fn release_restores_stock() {
        let catalog = catalog();
        let engine = InventoryReservationEngine::new(Arc::clone(&catalog));

        let reservation = engine.reserve(&[line("p1", 4)]).await.unwrap();
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(1));

        assert_eq!(engine.release(&reservation).await, 0);
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(5));
    }
}
