//! Utility modules
//!
//! - [`logger`] - tracing setup with optional rolling file output
//! - [`validation`] - JSON extractor that enforces `validator` rules
//!
//! Error types live in `shared::error` and are re-exported here so the
//! rest of the crate imports them from one place.

pub mod logger;
pub mod validation;

pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use validation::Validated;
