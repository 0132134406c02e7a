//! Core module — server configuration and state
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared service handles

pub mod config;
pub mod state;

pub use config::Config;
pub use state::ServerState;
