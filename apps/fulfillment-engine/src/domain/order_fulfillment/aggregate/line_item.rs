//! Order line item.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, ProductId};

/// One purchased product line, with its price frozen at order time.
///
/// Lines without a `product_id` are recorded on the order but never
/// reserved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    title: String,
    price: Money,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<ProductId>,
    brand: String,
    image_url: String,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        price: Money,
        quantity: u32,
        product_id: Option<ProductId>,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            quantity,
            product_id,
            brand: String::new(),
            image_url: String::new(),
        }
    }

    /// Attach display metadata.
    #[must_use]
    pub fn with_display(mut self, brand: impl Into<String>, image_url: impl Into<String>) -> Self {
        self.brand = brand.into();
        self.image_url = image_url.into();
        self
    }

    /// Product title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit price snapshot.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Units ordered.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Catalog product, if stock-tracked.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    /// Brand label.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Product image.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// `price × quantity`, or `None` if the product does not fit in a
    /// `Money`.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }

    /// A line is valid with a title, a positive price and a positive quantity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && self.price.is_positive() && self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies() {
        let item = LineItem::new("Monitor A", Money::from_cents(10_000), 2, None);
        assert_eq!(item.line_total(), Some(Money::from_cents(20_000)));
    }

    #[test]
    fn line_total_overflow_is_none() {
        let item = LineItem::new("Monitor A", Money::new(rust_decimal::Decimal::MAX), 2, None);
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn validity_gate() {
        assert!(LineItem::new("A", Money::from_cents(1), 1, None).is_valid());
        assert!(!LineItem::new("", Money::from_cents(1), 1, None).is_valid());
        assert!(!LineItem::new("A", Money::ZERO, 1, None).is_valid());
        assert!(!LineItem::new("A", Money::from_cents(1), 0, None).is_valid());
    }

    #[test]
    fn serializes_without_missing_product() {
        let item = LineItem::new("Cable", Money::from_cents(500), 1, None)
            .with_display("Acme", "http://img");
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("productId").is_none());
        assert_eq!(json["imageUrl"], "http://img");
        assert_eq!(json["price"], 5.0);
    }
}
