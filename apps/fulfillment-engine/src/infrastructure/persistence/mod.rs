//! Persistence Adapters
//!
//! In-memory implementations of the order and invoice repositories and the
//! catalog port.

pub mod in_memory;
pub mod in_memory_catalog;
pub mod in_memory_invoices;

pub use in_memory::InMemoryOrderRepository;
pub use in_memory_catalog::InMemoryCatalog;
pub use in_memory_invoices::InMemoryInvoiceRepository;
