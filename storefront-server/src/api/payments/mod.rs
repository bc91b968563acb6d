//! Payment API Module

use axum::{Router, middleware, routing::post};

use crate::auth::middleware::require_permission;
use crate::core::ServerState;

mod handler;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest(
            "/api/payments",
            Router::new()
                .route("/intent", post(handler::create_intent))
                .route("/confirm", post(handler::confirm)),
        )
        .layer(middleware::from_fn(require_permission("payments:write")))
}
