//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driver Ports** (Primary/Inbound): How the world uses our application
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod catalog_port;
mod event_publisher_port;
mod notification_port;

pub use catalog_port::{CatalogError, CatalogPort};
pub use event_publisher_port::{
    EventPublishError, EventPublisherPort, NoOpEventPublisher, TracingEventPublisher,
    publish_best_effort,
};
pub use notification_port::{
    LoggingNotifier, NotificationError, NotificationPort, OrderNotification,
};
