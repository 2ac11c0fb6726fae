//! Create Invoice Use Case
//!
//! Prices every requested product from the catalog, takes the stock, then
//! stores the invoice. A failed write hands the stock back.

use std::sync::Arc;
use std::time::Instant;

use crate::application::dto::{CreateInvoiceRequest, InvoiceDto};
use crate::application::ports::{CatalogError, CatalogPort};
use crate::application::services::InventoryReservationEngine;
use crate::domain::inventory::InventoryError;
use crate::domain::invoicing::{Invoice, InvoiceError, InvoiceLine, InvoiceRepository};
use crate::domain::shared::{ProductId, UserId};
use crate::error::ServiceError;
use crate::observability::{record_invoice_failure, record_invoice_issued};

/// Use case for issuing an invoice against catalog stock.
pub struct CreateInvoiceUseCase<I, C>
where
    I: InvoiceRepository + 'static,
    C: CatalogPort + 'static,
{
    invoice_repo: Arc<I>,
    catalog: Arc<C>,
    reservations: Arc<InventoryReservationEngine<C>>,
}

impl<I, C> CreateInvoiceUseCase<I, C>
where
    I: InvoiceRepository + 'static,
    C: CatalogPort + 'static,
{
    /// Create a new CreateInvoiceUseCase.
    pub fn new(invoice_repo: Arc<I>, catalog: Arc<C>) -> Self {
        Self {
            invoice_repo,
            reservations: Arc::new(InventoryReservationEngine::new(Arc::clone(&catalog))),
            catalog,
        }
    }

    /// Execute the use case.
    ///
    /// Unit prices always come from the catalog. Stock is taken with the
    /// same conditional decrement orders use, so invoices and orders never
    /// oversell each other. Like order placement, the reservation and write
    /// run on a detached task.
    ///
    /// # Errors
    ///
    /// - `INVALID_REQUEST` for an empty list, a blank product id or a
    ///   quantity outside `1..=u32::MAX`
    /// - `PRODUCT_NOT_FOUND` for an unknown product
    /// - `INVALID_TOTALS` when the total is above the order amount ceiling
    /// - `INSUFFICIENT_STOCK` when any product is short
    pub async fn execute(
        &self,
        request: CreateInvoiceRequest,
        user_id: UserId,
    ) -> Result<InvoiceDto, ServiceError> {
        let started = Instant::now();

        let wanted = match requested_lines(request) {
            Ok(wanted) => wanted,
            Err(e) => {
                record_invoice_failure("validation");
                return Err(e.into());
            }
        };

        let mut lines = Vec::with_capacity(wanted.len());
        for (product_id, quantity) in wanted {
            let product = match self.catalog.find_product(&product_id).await {
                Ok(Some(product)) => product,
                Ok(None) | Err(CatalogError::NotFound { .. }) => {
                    record_invoice_failure("product");
                    return Err(InventoryError::ProductNotFound {
                        product_id,
                        title: None,
                    }
                    .into());
                }
                Err(CatalogError::Unavailable { message }) => {
                    record_invoice_failure("storage");
                    return Err(InventoryError::Storage { message }.into());
                }
            };
            lines.push(InvoiceLine::priced(&product, quantity));
        }

        let invoice = match Invoice::issue(user_id, lines) {
            Ok(invoice) => invoice,
            Err(e) => {
                record_invoice_failure("validation");
                return Err(e.into());
            }
        };

        let invoice_repo = Arc::clone(&self.invoice_repo);
        let reservations = Arc::clone(&self.reservations);

        let issued = tokio::spawn(async move {
            Self::reserve_and_insert(invoice, &*invoice_repo, &reservations).await
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Invoice task failed");
            ServiceError::internal(e.to_string())
        })??;

        record_invoice_issued(started.elapsed().as_secs_f64());
        Ok(issued)
    }

    async fn reserve_and_insert(
        invoice: Invoice,
        invoice_repo: &I,
        reservations: &InventoryReservationEngine<C>,
    ) -> Result<InvoiceDto, ServiceError> {
        let reservation = match reservations.reserve(&invoice.line_items()).await {
            Ok(reservation) => reservation,
            Err(e) => {
                record_invoice_failure("stock");
                return Err(e.into());
            }
        };

        if let Err(e) = invoice_repo.insert(&invoice).await {
            record_invoice_failure("storage");
            tracing::warn!(
                invoice_id = %invoice.id(),
                error = %e,
                units = reservation.total_units(),
                "Invoice write failed, releasing reserved stock"
            );
            let failed = reservations.release(&reservation).await;
            if failed > 0 {
                tracing::error!(
                    invoice_id = %invoice.id(),
                    failed,
                    "Stock compensation incomplete"
                );
            }
            return Err(e.into());
        }

        tracing::info!(
            invoice_id = %invoice.id(),
            user_id = %invoice.user_id(),
            units = invoice.unit_count(),
            total = %invoice.total(),
            "Invoice issued"
        );

        Ok(InvoiceDto::from(&invoice))
    }
}

fn requested_lines(request: CreateInvoiceRequest) -> Result<Vec<(ProductId, u32)>, InvoiceError> {
    if request.lines.is_empty() {
        return Err(InvoiceError::InvalidRequest {
            field: "products".to_string(),
            message: "Products array is required".to_string(),
        });
    }

    request
        .lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let product_id = line.product_id.trim();
            if product_id.is_empty() {
                return Err(InvoiceError::InvalidRequest {
                    field: format!("products[{index}].product"),
                    message: "Product id is required".to_string(),
                });
            }
            let quantity = u32::try_from(line.quantity)
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| InvoiceError::InvalidRequest {
                    field: format!("products[{index}].quantity"),
                    message: format!("quantity must be between 1 and {}", u32::MAX),
                })?;
            Ok((ProductId::new(product_id), quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::dto::InvoiceLineRequest;
    use crate::domain::inventory::Product;
    use crate::domain::shared::{InvoiceId, Money};
    use crate::error::ErrorCode;
    use crate::infrastructure::persistence::{InMemoryCatalog, InMemoryInvoiceRepository};

    struct Fixture {
        invoices: Arc<InMemoryInvoiceRepository>,
        catalog: Arc<InMemoryCatalog>,
        use_case: CreateInvoiceUseCase<InMemoryInvoiceRepository, InMemoryCatalog>,
    }

    fn catalog() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::with_products(vec![
            Product::new(ProductId::new("p1"), "Monitor A", "Acme", Money::from_cents(20_000), 5),
            Product::new(ProductId::new("p2"), "Cable", "Acme", Money::from_cents(999), 1),
        ]))
    }

    fn fixture() -> Fixture {
        let invoices = Arc::new(InMemoryInvoiceRepository::new());
        let catalog = catalog();
        let use_case = CreateInvoiceUseCase::new(Arc::clone(&invoices), Arc::clone(&catalog));
        Fixture {
            invoices,
            catalog,
            use_case,
        }
    }

    fn request(lines: &[(&str, i64)]) -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            lines: lines
                .iter()
                .map(|(product_id, quantity)| InvoiceLineRequest {
                    product_id: (*product_id).to_string(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn prices_from_catalog_and_takes_stock() {
        let f = fixture();

        let invoice = f
            .use_case
            .execute(request(&[("p1", 2), ("p2", 1)]), UserId::new("u1"))
            .await
            .unwrap();

        assert_eq!(invoice.total, Money::from_cents(40_999));
        assert_eq!(invoice.products[0].price, Money::from_cents(20_000));
        assert_eq!(invoice.products[0].line_total, Money::from_cents(40_000));
        assert_eq!(f.catalog.stock_of(&ProductId::new("p1")), Some(3));
        assert_eq!(f.catalog.stock_of(&ProductId::new("p2")), Some(0));
        assert_eq!(f.invoices.len(), 1);
    }

    #[tokio::test]
    async fn short_stock_takes_nothing() {
        let f = fixture();

        let err = f
            .use_case
            .execute(request(&[("p1", 2), ("p2", 2)]), UserId::new("u1"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InsufficientStock);
        assert_eq!(f.catalog.stock_of(&ProductId::new("p1")), Some(5));
        assert!(f.invoices.is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let f = fixture();

        let err = f
            .use_case
            .execute(request(&[("ghost", 1)]), UserId::new("u1"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ProductNotFound);
        assert!(f.invoices.is_empty());
    }

    #[tokio::test]
    async fn malformed_requests_are_rejected_before_lookup() {
        let f = fixture();

        let malformed = [
            request(&[]),
            request(&[("  ", 1)]),
            request(&[("p1", 0)]),
            request(&[("p1", -3)]),
        ];
        for bad in malformed {
            let err = f.use_case.execute(bad, UserId::new("u1")).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidRequest);
        }
        assert_eq!(f.catalog.stock_of(&ProductId::new("p1")), Some(5));
    }

    #[tokio::test]
    async fn oversized_total_is_rejected_before_stock() {
        let catalog = Arc::new(InMemoryCatalog::with_products(vec![Product::new(
            ProductId::new("gold"),
            "Gold bar",
            "Mint",
            Money::MAX_ORDER_AMOUNT,
            10,
        )]));
        let invoices = Arc::new(InMemoryInvoiceRepository::new());
        let use_case = CreateInvoiceUseCase::new(Arc::clone(&invoices), Arc::clone(&catalog));

        let err = use_case
            .execute(request(&[("gold", 2)]), UserId::new("u1"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidTotals);
        assert_eq!(catalog.stock_of(&ProductId::new("gold")), Some(10));
        assert!(invoices.is_empty());
    }

    /// Invoice store whose writes always fail.
    struct RejectingInserts;

    #[async_trait]
    impl InvoiceRepository for RejectingInserts {
        async fn insert(&self, _invoice: &Invoice) -> Result<(), InvoiceError> {
            Err(InvoiceError::Storage {
                message: "disk full".to_string(),
            })
        }

        async fn find_by_id(&self, _id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
            Ok(None)
        }

        async fn list_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
            Ok(Vec::new())
        }

        async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<Invoice>, InvoiceError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn failed_write_restores_stock() {
        let catalog = catalog();
        let use_case = CreateInvoiceUseCase::new(Arc::new(RejectingInserts), Arc::clone(&catalog));

        let err = use_case
            .execute(request(&[("p1", 4)]), UserId::new("u1"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(5));
    }
}
