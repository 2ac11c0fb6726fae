//! Inventory Bounded Context
//!
//! A single stock counter per product. Stock only changes through a
//! conditional decrement, an increment, or an administrative overwrite, so it
//! can never go negative.

pub mod errors;
pub mod product;
pub mod reservation;

pub use errors::InventoryError;
pub use product::Product;
pub use reservation::{DecrementOutcome, Reservation, ReservedStock, StockRequest};
