//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`orders`] - order management endpoints

pub mod health;
pub mod orders;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Compose all API routers
pub fn router() -> Router<ServerState> {
    Router::new().merge(health::router()).merge(orders::router())
}
