//! Order API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Order router.
///
/// Reading, placing and moving orders through the lifecycle carry
/// separate grants; placing and canceling is a customer concern while
/// status updates belong to vendors.
pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .nest("/api/orders", orders_read_routes())
        .layer(middleware::from_fn(require_permission("orders:read")));

    let write_routes = Router::new()
        .nest("/api/orders", orders_write_routes())
        .layer(middleware::from_fn(require_permission("orders:write")));

    let status_routes = Router::new()
        .nest("/api/orders", orders_status_routes())
        .layer(middleware::from_fn(require_permission(
            "orders:update_status",
        )));

    read_routes.merge(write_routes).merge(status_routes)
}

fn orders_read_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

fn orders_write_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}/cancel", patch(handler::cancel))
}

fn orders_status_routes() -> Router<ServerState> {
    Router::new().route("/{id}", put(handler::update_status))
}
