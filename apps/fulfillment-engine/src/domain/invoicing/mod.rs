//! Invoicing Bounded Context
//!
//! An invoice is a priced record of catalog products bought by one account.
//! Unit prices come from the catalog at issue time, never from the caller,
//! and issuing an invoice draws down the same stock counters orders use.

pub mod errors;
pub mod invoice;
pub mod repository;

pub use errors::InvoiceError;
pub use invoice::{Invoice, InvoiceLine};
pub use repository::InvoiceRepository;
