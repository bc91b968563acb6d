//! Core Module
//!
//! Server configuration, shared state and the HTTP server itself.
//!
//! - [`Config`] - configuration loaded from the environment
//! - [`ServerState`] - shared state cloned into every handler
//! - [`Server`] - HTTP server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
