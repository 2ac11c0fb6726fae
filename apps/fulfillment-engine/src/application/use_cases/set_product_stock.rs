//! Set Product Stock Use Case

use std::sync::Arc;

use crate::application::dto::{ProductDto, StockUpdateResponseDto};
use crate::application::ports::{CatalogError, CatalogPort};
use crate::domain::inventory::InventoryError;
use crate::domain::shared::ProductId;
use crate::error::ServiceError;

/// Use case for overwriting a product's stock level.
pub struct SetProductStockUseCase<C>
where
    C: CatalogPort,
{
    catalog: Arc<C>,
}

impl<C> SetProductStockUseCase<C>
where
    C: CatalogPort,
{
    /// Create a new SetProductStockUseCase.
    pub const fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// - Validation error for a negative or out-of-range stock value
    /// - `PRODUCT_NOT_FOUND` if the product does not exist
    pub async fn execute(
        &self,
        product_id: &ProductId,
        stock: i64,
    ) -> Result<StockUpdateResponseDto, ServiceError> {
        if stock < 0 {
            return Err(InventoryError::InvalidStock {
                message: "Stock cannot be negative".to_string(),
            }
            .into());
        }
        let stock = u32::try_from(stock).map_err(|_| InventoryError::InvalidStock {
            message: format!("Stock cannot exceed {}", u32::MAX),
        })?;

        let product = self
            .catalog
            .set_stock(product_id, stock)
            .await
            .map_err(|e| match e {
                CatalogError::NotFound { product_id } => InventoryError::ProductNotFound {
                    product_id,
                    title: None,
                },
                CatalogError::Unavailable { message } => InventoryError::Storage { message },
            })?;

        tracing::info!(product_id = %product_id, stock, "Product stock set");

        Ok(StockUpdateResponseDto {
            message: "Stock updated successfully".to_string(),
            product: ProductDto::from(&product),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::Product;
    use crate::domain::shared::Money;
    use crate::error::ErrorCode;
    use crate::infrastructure::persistence::InMemoryCatalog;

    fn use_case() -> (Arc<InMemoryCatalog>, SetProductStockUseCase<InMemoryCatalog>) {
        let catalog = Arc::new(InMemoryCatalog::with_products(vec![Product::new(
            ProductId::new("p1"),
            "Monitor A",
            "Acme",
            Money::from_cents(20_000),
            5,
        )]));
        (Arc::clone(&catalog), SetProductStockUseCase::new(catalog))
    }

    #[tokio::test]
    async fn sets_absolute_stock() {
        let (catalog, use_case) = use_case();
        let response = use_case.execute(&ProductId::new("p1"), 42).await.unwrap();
        assert_eq!(response.product.stock, 42);
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(42));
    }

    #[tokio::test]
    async fn negative_stock_is_rejected() {
        let (catalog, use_case) = use_case();
        let err = use_case.execute(&ProductId::new("p1"), -1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Stock cannot be negative");
        assert_eq!(catalog.stock_of(&ProductId::new("p1")), Some(5));
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let (_, use_case) = use_case();
        let err = use_case.execute(&ProductId::new("nope"), 1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProductNotFound);
    }
}
