//! Shared types for the Storefront backend
//!
//! Common types used across crates including error types, data models,
//! request/response structures, and the unified API envelope.

pub mod error;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use axum::{Json, body};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
