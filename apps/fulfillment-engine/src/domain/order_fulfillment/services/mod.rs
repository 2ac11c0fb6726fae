//! Order Fulfillment Domain Services
//!
//! Stateless business logic that doesn't fit in the aggregate.

mod order_assembler;
mod order_state_machine;
mod order_statistics;

pub use order_assembler::{AssemblyPolicy, OrderAssembler, RawOrderSubmission};
pub use order_state_machine::{
    ForwardOnlyTransitions, OrderStateMachine, PermissiveTransitions, TransitionPolicy,
    TransitionPolicyKind,
};
pub use order_statistics::{OrderStatistics, ProductSales, StatsPeriod, StatusBreakdown};
