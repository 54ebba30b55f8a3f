//! Swap API
//!
//! Axum-based HTTP surface for the swap aggregator: routes, handlers,
//! error mapping and middleware.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

#[cfg(feature = "openapi")]
pub mod openapi;

pub use router::{create_router, create_router_with_origins};
pub use state::AppState;
