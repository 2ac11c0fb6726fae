//! HTTP Driver Adapter
//!
//! REST endpoints for order placement, listings, lifecycle changes and stock
//! administration.

mod auth;
mod controller;
mod error;
mod request;
mod response;

pub use auth::{AdminPrincipal, Principal, Role, USER_ID_HEADER, USER_ROLE_HEADER};
pub use controller::{AppState, ENDPOINTS, create_router};
pub use request::*;
pub use response::*;
