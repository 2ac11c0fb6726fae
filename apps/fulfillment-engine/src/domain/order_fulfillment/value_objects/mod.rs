//! Order Fulfillment Value Objects
//!
//! Immutable types describing an order's status, payment and totals.

mod order_status;
mod order_totals;
mod payment;
mod shipping_info;

pub use order_status::OrderStatus;
pub use order_totals::{OrderTotals, SubmittedTotals, TotalsPolicy};
pub use payment::{CardInfo, PaymentMethod, PaymentStatus};
pub use shipping_info::ShippingInfo;
