//! Query Invoices Use Case

use std::sync::Arc;

use crate::application::dto::InvoiceDto;
use crate::domain::invoicing::{InvoiceError, InvoiceRepository};
use crate::domain::shared::{InvoiceId, UserId};
use crate::error::ServiceError;

/// Use case for reading invoices.
pub struct QueryInvoicesUseCase<I>
where
    I: InvoiceRepository,
{
    invoice_repo: Arc<I>,
}

impl<I> QueryInvoicesUseCase<I>
where
    I: InvoiceRepository,
{
    /// Create a new QueryInvoicesUseCase.
    pub const fn new(invoice_repo: Arc<I>) -> Self {
        Self { invoice_repo }
    }

    /// Every invoice, newest first.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the repository fails.
    pub async fn list_all(&self) -> Result<Vec<InvoiceDto>, ServiceError> {
        let invoices = self.invoice_repo.list_all().await?;
        tracing::debug!(returned = invoices.len(), "Invoice listing");
        Ok(invoices.iter().map(InvoiceDto::from).collect())
    }

    /// The caller's own invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the repository fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<InvoiceDto>, ServiceError> {
        let invoices = self.invoice_repo.list_for_user(user_id).await?;
        Ok(invoices.iter().map(InvoiceDto::from).collect())
    }

    /// Fetch one invoice. Only its owner or an admin may read it.
    ///
    /// # Errors
    ///
    /// - `INVOICE_NOT_FOUND` if no invoice has this id
    /// - `FORBIDDEN` if the caller neither owns it nor is an admin
    pub async fn get(
        &self,
        invoice_id: &InvoiceId,
        caller: &UserId,
        is_admin: bool,
    ) -> Result<InvoiceDto, ServiceError> {
        let invoice = self
            .invoice_repo
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| InvoiceError::NotFound {
                invoice_id: invoice_id.to_string(),
            })?;

        if !is_admin && invoice.user_id() != caller {
            tracing::warn!(
                invoice_id = %invoice_id,
                caller = %caller,
                "Invoice read by non-owner refused"
            );
            return Err(ServiceError::not_owner());
        }

        Ok(InvoiceDto::from(&invoice))
    }
}
