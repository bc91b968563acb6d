//! Product API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Product router - browsing, managing and deleting carry separate grants.
pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .nest("/api/products", products_read_routes())
        .layer(middleware::from_fn(require_permission("products:read")));

    let write_routes = Router::new()
        .nest("/api/products", products_write_routes())
        .layer(middleware::from_fn(require_permission("products:write")));

    let delete_routes = Router::new()
        .nest("/api/products", products_delete_routes())
        .layer(middleware::from_fn(require_permission("products:delete")));

    read_routes.merge(write_routes).merge(delete_routes)
}

fn products_read_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        // Discovery routes (static segments before /{id})
        .route("/search", get(handler::search))
        .route("/filter", post(handler::filter))
        .route("/{id}", get(handler::get_by_id))
}

fn products_write_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
}

fn products_delete_routes() -> Router<ServerState> {
    Router::new().route("/{id}", delete(handler::delete))
}
