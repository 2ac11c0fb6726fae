//! Stock requests, decrement outcomes and the compensation record.

use super::errors::InventoryError;
use crate::domain::order_fulfillment::LineItem;
use crate::domain::shared::ProductId;

/// Result of one conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Stock was taken.
    Applied {
        /// Units left after the decrement.
        remaining: u32,
    },
    /// Not enough units; nothing changed.
    Insufficient {
        /// Units on hand.
        available: u32,
    },
    /// The product does not exist; nothing changed.
    NotFound,
}

/// Units of one product an order needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRequest {
    /// Product to take from.
    pub product_id: ProductId,
    /// Title of the first line that referenced the product.
    pub title: String,
    /// Units across every line for this product.
    pub quantity: u32,
}

impl StockRequest {
    /// Collect requests for every stock-tracked line.
    ///
    /// Lines for the same product are merged, keeping first-seen order.
    /// Lines without a product id are skipped.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::QuantityTooLarge` when the merged units for a
    /// product do not fit in a stock counter.
    pub fn from_line_items(items: &[LineItem]) -> Result<Vec<Self>, InventoryError> {
        let mut requests: Vec<Self> = Vec::new();
        for item in items {
            let Some(product_id) = item.product_id() else {
                continue;
            };
            match requests.iter_mut().find(|r| &r.product_id == product_id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(item.quantity())
                        .ok_or_else(|| InventoryError::QuantityTooLarge {
                            product_id: product_id.clone(),
                            title: existing.title.clone(),
                        })?;
                }
                None => requests.push(Self {
                    product_id: product_id.clone(),
                    title: item.title().to_string(),
                    quantity: item.quantity(),
                }),
            }
        }
        Ok(requests)
    }
}

/// One applied decrement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedStock {
    /// Product decremented.
    pub product_id: ProductId,
    /// Units taken.
    pub quantity: u32,
}

/// Decrements applied for one order, in application order.
///
/// Releasing a reservation restocks every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reservation {
    entries: Vec<ReservedStock>,
}

impl Reservation {
    /// Empty reservation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an applied decrement.
    pub fn record(&mut self, product_id: ProductId, quantity: u32) {
        self.entries.push(ReservedStock {
            product_id,
            quantity,
        });
    }

    /// Applied decrements.
    #[must_use]
    pub fn entries(&self) -> &[ReservedStock] {
        &self.entries
    }

    /// True when nothing was reserved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Units reserved across every product.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Money;

    #[test]
    fn merges_lines_for_the_same_product() {
        let items = vec![
            LineItem::new("Monitor A", Money::from_cents(100), 1, Some(ProductId::new("p1"))),
            LineItem::new("Gift card", Money::from_cents(100), 1, None),
            LineItem::new("Cable", Money::from_cents(100), 2, Some(ProductId::new("p2"))),
            LineItem::new("Monitor A (2)", Money::from_cents(100), 3, Some(ProductId::new("p1"))),
        ];

        let requests = StockRequest::from_line_items(&items).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].product_id.as_str(), "p1");
        assert_eq!(requests[0].title, "Monitor A");
        assert_eq!(requests[0].quantity, 4);
        assert_eq!(requests[1].quantity, 2);
    }

    #[test]
    fn merged_quantity_past_counter_range_is_rejected() {
        let items = vec![
            LineItem::new("Monitor A", Money::from_cents(100), u32::MAX, Some(ProductId::new("p1"))),
            LineItem::new("Monitor A", Money::from_cents(100), 1, Some(ProductId::new("p1"))),
        ];

        let err = StockRequest::from_line_items(&items).unwrap_err();

        assert_eq!(
            err,
            InventoryError::QuantityTooLarge {
                product_id: ProductId::new("p1"),
                title: "Monitor A".to_string(),
            }
        );
    }

    #[test]
    fn reservation_records_entries() {
        let mut reservation = Reservation::new();
        assert!(reservation.is_empty());

        reservation.record(ProductId::new("p1"), 2);
        reservation.record(ProductId::new("p2"), 3);

        assert_eq!(reservation.entries().len(), 2);
        assert_eq!(reservation.total_units(), 5);
    }
}
