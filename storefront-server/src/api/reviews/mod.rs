//! Review API Module
//!
//! Review submission and reading hang off the product they belong to;
//! moderation lives under /api/reviews and is admin only.

use axum::{
    Router,
    middleware,
    routing::{get, patch, post},
};

use crate::auth::middleware::{require_admin, require_permission};
use crate::core::ServerState;

mod handler;

pub fn router() -> Router<ServerState> {
    let submit_routes = Router::new()
        .route("/api/products/{product_id}/reviews", post(handler::submit))
        .layer(middleware::from_fn(require_permission("reviews:write")));

    let read_routes = Router::new()
        .route(
            "/api/products/{product_id}/reviews",
            get(handler::product_reviews),
        )
        .layer(middleware::from_fn(require_permission("reviews:read")));

    let moderation_routes = Router::new()
        .nest(
            "/api/reviews",
            Router::new()
                .route("/pending", get(handler::pending))
                .route("/{id}/approve", patch(handler::approve))
                .route("/{id}/reject", patch(handler::reject)),
        )
        .layer(middleware::from_fn(require_admin));

    submit_routes.merge(read_routes).merge(moderation_routes)
}
