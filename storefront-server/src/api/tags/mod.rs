//! Tag API Module
//!
//! Tag router - writes share the product management grant.

use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use crate::auth::middleware::require_permission;
use crate::core::ServerState;

mod handler;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .nest(
            "/api/tags",
            Router::new()
                .route("/", get(handler::list))
                .route("/{id}", get(handler::get_by_id)),
        )
        .layer(middleware::from_fn(require_permission("products:read")));

    let write_routes = Router::new()
        .nest(
            "/api/tags",
            Router::new()
                .route("/", post(handler::create))
                .route(
                    "/{id}",
                    axum::routing::put(handler::update).delete(handler::delete),
                ),
        )
        .layer(middleware::from_fn(require_permission("products:write")));

    read_routes.merge(write_routes)
}
