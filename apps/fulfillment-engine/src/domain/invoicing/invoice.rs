//! Invoice aggregate.

use serde::Serialize;

use super::errors::InvoiceError;
use crate::domain::inventory::Product;
use crate::domain::order_fulfillment::LineItem;
use crate::domain::shared::{InvoiceId, Money, ProductId, Timestamp, UserId};

/// One invoiced product, priced from the catalog at issue time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    product_id: ProductId,
    title: String,
    brand: String,
    unit_price: Money,
    quantity: u32,
}

impl InvoiceLine {
    /// Price `quantity` units of a catalog product at its current list price.
    #[must_use]
    pub fn priced(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id().clone(),
            title: product.title().to_string(),
            brand: product.brand().to_string(),
            unit_price: product.price(),
            quantity,
        }
    }

    /// Catalog product.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product title at issue time.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Brand at issue time.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Catalog price at issue time.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Units bought.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price × quantity`, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }

    fn to_line_item(&self) -> LineItem {
        LineItem::new(
            self.title.clone(),
            self.unit_price,
            self.quantity,
            Some(self.product_id.clone()),
        )
        .with_display(self.brand.clone(), String::new())
    }
}

/// An issued invoice. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    id: InvoiceId,
    user_id: UserId,
    lines: Vec<InvoiceLine>,
    total: Money,
    created_at: Timestamp,
}

impl Invoice {
    /// Issue an invoice for `user_id` over catalog-priced lines.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when there are no lines or a line has zero units
    /// - `AmountTooLarge` when a line total or the invoice total is above
    ///   [`Money::MAX_ORDER_AMOUNT`]
    pub fn issue(user_id: UserId, lines: Vec<InvoiceLine>) -> Result<Self, InvoiceError> {
        if lines.is_empty() {
            return Err(InvoiceError::InvalidRequest {
                field: "products".to_string(),
                message: "Products array is required".to_string(),
            });
        }

        let mut total = Money::ZERO;
        for (index, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(InvoiceError::InvalidRequest {
                    field: format!("products[{index}].quantity"),
                    message: "quantity must be at least 1".to_string(),
                });
            }
            let line_total = line
                .line_total()
                .filter(|amount| !amount.exceeds_order_limit())
                .ok_or_else(|| InvoiceError::AmountTooLarge {
                    field: format!("products[{index}]"),
                })?;
            total = total
                .checked_add(line_total)
                .filter(|amount| !amount.exceeds_order_limit())
                .ok_or_else(|| InvoiceError::AmountTooLarge {
                    field: "total".to_string(),
                })?;
        }

        Ok(Self {
            id: InvoiceId::generate(),
            user_id,
            lines,
            total,
            created_at: Timestamp::now(),
        })
    }

    /// Invoice id.
    #[must_use]
    pub const fn id(&self) -> &InvoiceId {
        &self.id
    }

    /// Buying account.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Invoiced lines in request order.
    #[must_use]
    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    /// Σ unit price × quantity.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Issue time.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Total units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// The lines as stock-tracked line items, for reservation.
    #[must_use]
    pub fn line_items(&self) -> Vec<LineItem> {
        self.lines.iter().map(InvoiceLine::to_line_item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn monitor(cents: i64) -> Product {
        Product::new(ProductId::new("p1"), "Monitor A", "Acme", Money::from_cents(cents), 5)
    }

    #[test]
    fn issue_totals_catalog_prices() {
        let cable = Product::new(ProductId::new("p2"), "Cable", "Acme", Money::from_cents(999), 9);
        let invoice = Invoice::issue(
            UserId::new("u1"),
            vec![
                InvoiceLine::priced(&monitor(20_000), 2),
                InvoiceLine::priced(&cable, 3),
            ],
        )
        .unwrap();

        assert_eq!(invoice.total(), Money::from_cents(42_997));
        assert_eq!(invoice.unit_count(), 5);
        assert!(invoice.id().as_str().starts_with("INV-"));
        assert_eq!(invoice.lines()[0].title(), "Monitor A");
        assert_eq!(invoice.lines()[1].unit_price(), Money::from_cents(999));
    }

    #[test]
    fn line_items_carry_product_ids_for_reservation() {
        let invoice =
            Invoice::issue(UserId::new("u1"), vec![InvoiceLine::priced(&monitor(100), 4)])
                .unwrap();

        let items = invoice.line_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id(), Some(&ProductId::new("p1")));
        assert_eq!(items[0].quantity(), 4);
    }

    #[test]
    fn empty_invoice_is_rejected() {
        let err = Invoice::issue(UserId::new("u1"), Vec::new()).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidRequest { ref field, .. } if field == "products"));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = Invoice::issue(UserId::new("u1"), vec![InvoiceLine::priced(&monitor(100), 0)])
            .unwrap_err();
        assert!(
            matches!(err, InvoiceError::InvalidRequest { ref field, .. } if field == "products[0].quantity")
        );
    }

    #[test]
    fn oversized_totals_are_rejected() {
        let vault = Product::new(ProductId::new("v"), "Vault", "", Money::new(Decimal::MAX), 1);
        let err = Invoice::issue(UserId::new("u1"), vec![InvoiceLine::priced(&vault, 2)])
            .unwrap_err();
        assert_eq!(
            err,
            InvoiceError::AmountTooLarge {
                field: "products[0]".to_string()
            }
        );

        let big = Product::new(
            ProductId::new("b"),
            "Big",
            "",
            Money::MAX_ORDER_AMOUNT,
            2,
        );
        let err = Invoice::issue(
            UserId::new("u1"),
            vec![InvoiceLine::priced(&big, 1), InvoiceLine::priced(&big, 1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvoiceError::AmountTooLarge {
                field: "total".to_string()
            }
        );
    }
}
