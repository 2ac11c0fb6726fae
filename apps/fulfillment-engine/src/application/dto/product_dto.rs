//! Product DTOs.

use serde::Serialize;

use crate::domain::inventory::Product;
use crate::domain::shared::{Money, ProductId};

/// JSON document for one product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    /// Product id.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Brand label.
    pub brand: String,
    /// List price.
    pub price: Money,
    /// Units on hand.
    pub stock: u32,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().clone(),
            title: product.title().to_string(),
            brand: product.brand().to_string(),
            price: product.price(),
            stock: product.stock(),
        }
    }
}

/// Stock update response.
#[derive(Debug, Clone, Serialize)]
pub struct StockUpdateResponseDto {
    /// Outcome message.
    pub message: String,
    /// Updated product.
    pub product: ProductDto,
}
