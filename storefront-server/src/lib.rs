//! Storefront Server - e-commerce REST backend
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): per-resource routers and handlers
//! - **Authentication** (`auth`): JWT + Argon2, role-based permissions
//! - **Services** (`services`): order lifecycle, catalog, reviews, payments
//! - **Database** (`db`): SQLite via sqlx with embedded migrations
//! - **Cache** (`cache`): in-process TTL cache for hot read paths
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, password hashing, permissions
//! ├── services/      # business logic over the repositories
//! ├── api/           # HTTP routes and handlers
//! ├── routes/        # router assembly and middleware stack
//! ├── cache.rs       # TTL cache
//! ├── db/            # pool, migrations, repositories
//! └── utils/         # logging, validation, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod core;
pub mod db;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - carries a `security` target for log routing
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
