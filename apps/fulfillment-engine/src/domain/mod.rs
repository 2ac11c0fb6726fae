//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Events**: Records of state transitions
//! - **Domain Services**: Stateless business logic
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`order_fulfillment`]: Order assembly, lifecycle and listing criteria
//! - [`inventory`]: Stock counters, conditional decrements and reservations
//! - [`invoicing`]: Catalog-priced invoices that draw on the same stock

pub mod inventory;
pub mod invoicing;
pub mod order_fulfillment;
pub mod shared;
