//! User API Module
//!
//! `/api/user` is the caller's own profile; role administration under
//! `/api/users/{id}` is admin only.

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::middleware::require_admin;
use crate::core::ServerState;

mod handler;

pub fn router() -> Router<ServerState> {
    let profile_routes = Router::new()
        .route("/api/user", get(handler::me))
        .route("/api/user/roles", get(handler::my_roles));

    let admin_routes = Router::new()
        .nest(
            "/api/users",
            Router::new()
                .route("/{id}/assign-role", post(handler::assign_role))
                .route("/{id}/remove-role", post(handler::remove_role)),
        )
        .layer(middleware::from_fn(require_admin));

    profile_routes.merge(admin_routes)
}
