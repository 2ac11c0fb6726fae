//! Order State Machine Service
//!
//! Validates staff-driven status changes against a pluggable policy.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::order_fulfillment::errors::OrderError;
use crate::domain::order_fulfillment::value_objects::OrderStatus;

/// Decides whether an order may move from one status to another.
pub trait TransitionPolicy: Send + Sync {
    /// Check a transition.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the transition is not allowed.
    fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<(), String>;
}

/// Any status may follow any other, including itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveTransitions;

impl TransitionPolicy for PermissiveTransitions {
    fn check(&self, _from: OrderStatus, _to: OrderStatus) -> Result<(), String> {
        Ok(())
    }
}

/// Forward-only fulfillment graph.
///
/// ```text
/// pending -> processing -> shipped -> delivered -> returned
///    |            |           |
///    +------------+-----> cancelled     shipped -> returned
/// ```
///
/// `cancelled` and `returned` are terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardOnlyTransitions;

impl ForwardOnlyTransitions {
    const fn allows(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            (OrderStatus::Pending, OrderStatus::Processing | OrderStatus::Cancelled)
                | (
                    OrderStatus::Processing,
                    OrderStatus::Shipped | OrderStatus::Cancelled
                )
                | (
                    OrderStatus::Shipped,
                    OrderStatus::Delivered | OrderStatus::Returned
                )
                | (OrderStatus::Delivered, OrderStatus::Returned)
        )
    }
}

impl TransitionPolicy for ForwardOnlyTransitions {
    fn check(&self, from: OrderStatus, to: OrderStatus) -> Result<(), String> {
        if Self::allows(from, to) {
            return Ok(());
        }
        Err(match from {
            OrderStatus::Cancelled => format!("Order is cancelled, cannot transition to {to}"),
            OrderStatus::Returned => format!("Order was returned, cannot transition to {to}"),
            _ => format!("Invalid transition from {from} to {to}"),
        })
    }
}

/// Which built-in policy to run with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicyKind {
    /// [`PermissiveTransitions`].
    #[default]
    Permissive,
    /// [`ForwardOnlyTransitions`].
    ForwardOnly,
}

/// Order State Machine for validating transitions.
#[derive(Clone)]
pub struct OrderStateMachine {
    policy: Arc<dyn TransitionPolicy>,
}

impl OrderStateMachine {
    /// Build a state machine around a custom policy.
    #[must_use]
    pub fn new(policy: Arc<dyn TransitionPolicy>) -> Self {
        Self { policy }
    }

    /// State machine that allows every transition.
    #[must_use]
    pub fn permissive() -> Self {
        Self::new(Arc::new(PermissiveTransitions))
    }

    /// State machine for one of the built-in policies.
    #[must_use]
    pub fn from_kind(kind: TransitionPolicyKind) -> Self {
        match kind {
            TransitionPolicyKind::Permissive => Self::permissive(),
            TransitionPolicyKind::ForwardOnly => Self::new(Arc::new(ForwardOnlyTransitions)),
        }
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidStateTransition` if the policy refuses it.
    pub fn validate_transition(
        &self,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<(), OrderError> {
        self.policy
            .check(from, to)
            .map_err(|reason| OrderError::InvalidStateTransition { from, to, reason })
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(&self, from: OrderStatus) -> Vec<OrderStatus> {
        OrderStatus::ALL
            .into_iter()
            .filter(|to| self.policy.check(from, *to).is_ok())
            .collect()
    }
}

impl Default for OrderStateMachine {
    fn default() -> Self {
        Self::permissive()
    }
}

impl fmt::Debug for OrderStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderStateMachine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn permissive_allows_everything() {
        let machine = OrderStateMachine::permissive();
        for from in OrderStatus::ALL {
            assert_eq!(machine.valid_next_states(from), OrderStatus::ALL.to_vec());
        }
        assert!(
            machine
                .validate_transition(OrderStatus::Delivered, OrderStatus::Pending)
                .is_ok()
        );
    }

    #[test_case(OrderStatus::Pending, OrderStatus::Processing, true)]
    #[test_case(OrderStatus::Pending, OrderStatus::Shipped, false)]
    #[test_case(OrderStatus::Processing, OrderStatus::Shipped, true)]
    #[test_case(OrderStatus::Shipped, OrderStatus::Returned, true)]
    #[test_case(OrderStatus::Delivered, OrderStatus::Pending, false)]
    #[test_case(OrderStatus::Cancelled, OrderStatus::Processing, false)]
    #[test_case(OrderStatus::Returned, OrderStatus::Returned, false)]
    fn forward_only(from: OrderStatus, to: OrderStatus, allowed: bool) {
        let machine = OrderStateMachine::from_kind(TransitionPolicyKind::ForwardOnly);
        assert_eq!(machine.validate_transition(from, to).is_ok(), allowed);
    }

    #[test]
    fn forward_only_reason_names_terminal_state() {
        let machine = OrderStateMachine::from_kind(TransitionPolicyKind::ForwardOnly);
        let err = machine
            .validate_transition(OrderStatus::Cancelled, OrderStatus::Shipped)
            .unwrap_err();

        match err {
            OrderError::InvalidStateTransition { reason, .. } => {
                assert!(reason.contains("cancelled"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(
            machine
                .valid_next_states(OrderStatus::Cancelled)
                .is_empty()
        );
    }
}
