//! Catalog seed data for the in-memory store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products loaded at startup.
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

/// One seeded product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSeed {
    /// Product id.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Brand label.
    #[serde(default)]
    pub brand: String,
    /// List price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units on hand.
    #[serde(default)]
    pub stock: u32,
}
