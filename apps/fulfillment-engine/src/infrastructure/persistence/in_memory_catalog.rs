//! In-memory product catalog.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{CatalogError, CatalogPort};
use crate::config::CatalogConfig;
use crate::domain::inventory::{DecrementOutcome, Product};
use crate::domain::shared::{Money, ProductId};

/// In-memory implementation of `CatalogPort`.
///
/// Every stock change runs inside one critical section, so the availability
/// check and the write are atomic. The lock is never held across an await.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given products.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(
                products
                    .into_iter()
                    .map(|p| (p.id().clone(), p))
                    .collect(),
            ),
        }
    }

    /// Create a catalog from the configured seed list.
    #[must_use]
    pub fn from_seed(config: &CatalogConfig) -> Self {
        Self::with_products(
            config
                .products
                .iter()
                .map(|seed| {
                    Product::new(
                        ProductId::new(seed.id.clone()),
                        seed.title.clone(),
                        seed.brand.clone(),
                        Money::new(seed.price),
                        seed.stock,
                    )
                })
                .collect(),
        )
    }

    /// Current stock of a product.
    #[must_use]
    pub fn stock_of(&self, product_id: &ProductId) -> Option<u32> {
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(product_id)
            .map(Product::stock)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn find_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(products.get(product_id).cloned())
    }

    async fn try_decrement(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<DecrementOutcome, CatalogError> {
        let mut products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(products
            .get_mut(product_id)
            .map_or(DecrementOutcome::NotFound, |p| p.try_take(quantity)))
    }

    async fn restock(&self, product_id: &ProductId, quantity: u32) -> Result<u32, CatalogError> {
        let mut products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        let product = products
            .get_mut(product_id)
            .ok_or_else(|| CatalogError::NotFound {
                product_id: product_id.clone(),
            })?;
        product.restock(quantity);
        Ok(product.stock())
    }

    async fn set_stock(&self, product_id: &ProductId, stock: u32) -> Result<Product, CatalogError> {
        let mut products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        let product = products
            .get_mut(product_id)
            .ok_or_else(|| CatalogError::NotFound {
                product_id: product_id.clone(),
            })?;
        product.set_stock(stock);
        Ok(product.clone())
    }
}
