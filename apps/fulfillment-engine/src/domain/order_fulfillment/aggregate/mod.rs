//! Order Aggregate
//!
//! The Order aggregate is the root entity for fulfillment state.

mod line_item;
mod order;

pub use line_item::LineItem;
pub use order::{Order, PlaceOrderCommand, ReconstitutedOrderParams};
