//! Catalog product as seen by inventory.

use serde::{Deserialize, Serialize};

use super::reservation::DecrementOutcome;
use crate::domain::shared::{Money, ProductId};

/// A sellable product with a single stock counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    brand: String,
    price: Money,
    stock: u32,
}

impl Product {
    /// Create a product.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        brand: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            brand: brand.into(),
            price,
            stock,
        }
    }

    /// Product id.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Brand label.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Current list price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Units on hand.
    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.stock
    }

    /// Take `quantity` units if and only if that many are on hand.
    pub fn try_take(&mut self, quantity: u32) -> DecrementOutcome {
        match self.stock.checked_sub(quantity) {
            Some(remaining) => {
                self.stock = remaining;
                DecrementOutcome::Applied { remaining }
            }
            None => DecrementOutcome::Insufficient {
                available: self.stock,
            },
        }
    }

    /// Put `quantity` units back, saturating at `u32::MAX`.
    pub fn restock(&mut self, quantity: u32) {
        self.stock = self.stock.saturating_add(quantity);
    }

    /// Overwrite the stock counter.
    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }
}
