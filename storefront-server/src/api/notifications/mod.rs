//! Notification API Module

use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use crate::auth::middleware::require_permission;
use crate::core::ServerState;

mod handler;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest(
            "/api/notifications",
            Router::new()
                .route("/", get(handler::list))
                .route("/mark-as-read", post(handler::mark_as_read)),
        )
        .layer(middleware::from_fn(require_permission("notifications:read")))
}
