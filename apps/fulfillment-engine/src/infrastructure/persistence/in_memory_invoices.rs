//! In-memory invoice repository.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::invoicing::{Invoice, InvoiceError, InvoiceRepository};
use crate::domain::shared::{InvoiceId, UserId};

/// In-memory implementation of `InvoiceRepository`.
///
/// Invoices are kept in issue order; listings walk it backwards so the
/// newest comes first. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
    invoices: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored invoices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.invoices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn insert(&self, invoice: &Invoice) -> Result<(), InvoiceError> {
        let mut invoices = self
            .invoices
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if invoices.iter().any(|i| i.id() == invoice.id()) {
            return Err(InvoiceError::Storage {
                message: format!("invoice id {} already stored", invoice.id()),
            });
        }
        invoices.push(invoice.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
        let invoices = self.invoices.read().unwrap_or_else(PoisonError::into_inner);
        Ok(invoices.iter().find(|i| i.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
        let invoices = self.invoices.read().unwrap_or_else(PoisonError::into_inner);
        Ok(invoices.iter().rev().cloned().collect())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Invoice>, InvoiceError> {
        let invoices = self.invoices.read().unwrap_or_else(PoisonError::into_inner);
        Ok(invoices
            .iter()
            .rev()
            .filter(|i| i.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::Product;
    use crate::domain::invoicing::InvoiceLine;
    use crate::domain::shared::{Money, ProductId};

    fn invoice(user: &str) -> Invoice {
        let product = Product::new(ProductId::new("p1"), "Mug", "", Money::from_cents(500), 3);
        Invoice::issue(UserId::new(user), vec![InvoiceLine::priced(&product, 1)]).unwrap()
    }

    #[tokio::test]
    async fn insert_rejects_reused_id() {
        let repo = InMemoryInvoiceRepository::new();
        let first = invoice("u1");
        repo.insert(&first).await.unwrap();

        let err = repo.insert(&first).await.unwrap_err();
        assert!(matches!(err, InvoiceError::Storage { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let repo = InMemoryInvoiceRepository::new();
        let (a, b, c) = (invoice("u1"), invoice("u2"), invoice("u1"));
        for i in [&a, &b, &c] {
            repo.insert(i).await.unwrap();
        }

        let all: Vec<InvoiceId> = repo
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|i| i.id().clone())
            .collect();
        assert_eq!(all, vec![c.id().clone(), b.id().clone(), a.id().clone()]);

        let mine = repo.list_for_user(&UserId::new("u1")).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id(), c.id());
    }

    #[tokio::test]
    async fn find_by_id_round_trips() {
        let repo = InMemoryInvoiceRepository::new();
        let stored = invoice("u1");
        repo.insert(&stored).await.unwrap();

        assert_eq!(repo.find_by_id(stored.id()).await.unwrap(), Some(stored));
        assert!(
            repo.find_by_id(&InvoiceId::new("INV-none"))
                .await
                .unwrap()
                .is_none()
        );
    }
}
