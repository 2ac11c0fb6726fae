//! Invoice DTOs

use serde::Serialize;

use crate::domain::invoicing::{Invoice, InvoiceLine};
use crate::domain::shared::{InvoiceId, Money, ProductId, Timestamp, UserId};

/// Invoice request as received, before any product lookup.
#[derive(Debug, Clone, Default)]
pub struct CreateInvoiceRequest {
    /// Requested lines in order.
    pub lines: Vec<InvoiceLineRequest>,
}

/// One requested product.
#[derive(Debug, Clone, Default)]
pub struct InvoiceLineRequest {
    /// Catalog product id, still unchecked.
    pub product_id: String,
    /// Requested units, still unchecked.
    pub quantity: i64,
}

/// JSON document for one invoice line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineDto {
    /// Catalog product.
    pub product_id: ProductId,
    /// Title at issue time.
    pub title: String,
    /// Brand at issue time.
    pub brand: String,
    /// Unit price at issue time.
    pub price: Money,
    /// Units bought.
    pub quantity: u32,
    /// `price × quantity`.
    pub line_total: Money,
}

impl From<&InvoiceLine> for InvoiceLineDto {
    fn from(line: &InvoiceLine) -> Self {
        Self {
            product_id: line.product_id().clone(),
            title: line.title().to_string(),
            brand: line.brand().to_string(),
            price: line.unit_price(),
            quantity: line.quantity(),
            line_total: line.unit_price().saturating_mul(line.quantity()),
        }
    }
}

/// JSON document for one invoice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    /// Invoice id.
    pub invoice_id: InvoiceId,
    /// Buying account.
    pub user_id: UserId,
    /// Invoiced products.
    pub products: Vec<InvoiceLineDto>,
    /// Grand total.
    pub total: Money,
    /// Issue time.
    pub created_at: Timestamp,
}

impl From<&Invoice> for InvoiceDto {
    fn from(invoice: &Invoice) -> Self {
        Self {
            invoice_id: invoice.id().clone(),
            user_id: invoice.user_id().clone(),
            products: invoice.lines().iter().map(InvoiceLineDto::from).collect(),
            total: invoice.total(),
            created_at: invoice.created_at(),
        }
    }
}
