//! Order Fulfillment Bounded Context
//!
//! Takes an order from a raw storefront submission to a persisted, pending
//! aggregate, and through staff-driven status changes afterwards.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: contents, totals and status of one order
//! - **Order Assembly**: lenient coercion followed by a strict validity gate
//! - **Transition Policy**: pluggable rules for status changes
//! - **Order Query**: filter, sort and page criteria for listings

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod query;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{LineItem, Order, PlaceOrderCommand, ReconstitutedOrderParams};
pub use errors::OrderError;
pub use events::{OrderDeleted, OrderEvent, OrderPlaced, OrderStatusChanged};
pub use query::{
    OrderFilter, OrderPage, OrderQuery, OrderSort, PageInfo, PageRequest, SortDirection, SortField,
};
pub use repository::{OrderMutation, OrderRepository};
pub use services::{
    AssemblyPolicy, OrderAssembler, OrderStateMachine, OrderStatistics, RawOrderSubmission,
    StatsPeriod, TransitionPolicy, TransitionPolicyKind,
};
pub use value_objects::{
    CardInfo, OrderStatus, OrderTotals, PaymentMethod, PaymentStatus, ShippingInfo, TotalsPolicy,
};
