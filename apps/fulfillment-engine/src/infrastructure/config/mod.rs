//! Infrastructure Configuration
//!
//! Dependency wiring for the application.

mod container;

pub use container::{Container, InMemoryContainer};
