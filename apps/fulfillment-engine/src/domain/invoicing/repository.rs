//! Invoice Repository Trait

use async_trait::async_trait;

use super::errors::InvoiceError;
use super::invoice::Invoice;
use crate::domain::shared::{InvoiceId, UserId};

/// Repository trait for invoice persistence.
///
/// Invoices are immutable once issued, so there is no update.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Store a newly issued invoice.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the write fails or the id is already taken.
    async fn insert(&self, invoice: &Invoice) -> Result<(), InvoiceError>;

    /// Find an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError>;

    /// Every invoice, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_all(&self) -> Result<Vec<Invoice>, InvoiceError>;

    /// One account's invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Invoice>, InvoiceError>;
}
