//! Category API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Category router - writes share the product management grant.
pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .nest("/api/categories", categories_read_routes())
        .layer(middleware::from_fn(require_permission("products:read")));

    let write_routes = Router::new()
        .nest("/api/categories", categories_write_routes())
        .layer(middleware::from_fn(require_permission("products:write")));

    read_routes.merge(write_routes)
}

fn categories_read_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

fn categories_write_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
}
