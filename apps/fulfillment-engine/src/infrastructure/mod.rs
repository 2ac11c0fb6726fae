//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: In-memory order repository and product catalog
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod config;
pub mod http;
pub mod persistence;
