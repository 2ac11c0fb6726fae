//! Application Services
//!
//! Application services coordinate domain logic and driven ports on behalf of
//! one or more use cases.

mod inventory_reservation;

pub use inventory_reservation::InventoryReservationEngine;
