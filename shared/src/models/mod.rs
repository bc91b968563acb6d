//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod notification;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod role;
pub mod tag;
pub mod user;

// Re-exports
pub use category::*;
pub use notification::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use review::*;
pub use role::*;
pub use tag::*;
pub use user::*;
