//! Shared test fixtures
//!
//! Every test builds a fresh server state over an in-memory database so
//! tests never see each other's rows.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use tower::ServiceExt;

use shared::models::{OrderCreate, OrderItemInput, Product, ProductCreate, UserRole};
use storefront_server::auth::permissions_for_roles;
use storefront_server::db::DbService;
use storefront_server::db::repository::{product, user};
use storefront_server::routes::build_app;
use storefront_server::{Config, CurrentUser, ServerState};

/// Fresh state over an in-memory database.
pub async fn test_state() -> ServerState {
    let db = DbService::new_in_memory()
        .await
        .expect("in-memory database");
    ServerState::from_parts(Config::from_env(), db.pool)
}

/// Create a user holding the given roles and return the acting context.
///
/// The stored password hash is a placeholder; tests that go through the
/// login endpoint register through the API instead.
pub async fn seed_user(
    state: &ServerState,
    name: &str,
    email: &str,
    roles: &[UserRole],
) -> CurrentUser {
    let user = user::create(&state.pool, name, email, "not-a-real-hash")
        .await
        .expect("create user");
    for role in roles {
        user::assign_role(&state.pool, user.id, *role)
            .await
            .expect("assign role");
    }
    CurrentUser {
        id: user.id,
        name: user.name,
        roles: roles.to_vec(),
        permissions: permissions_for_roles(roles),
    }
}

/// Create a product owned by `vendor`.
pub async fn seed_product(
    state: &ServerState,
    vendor: &CurrentUser,
    name: &str,
    price: &str,
) -> Product {
    product::create(
        &state.pool,
        vendor.id,
        ProductCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            price: dec(price),
            stock: 10,
            category_id: None,
            tag_id: None,
        },
    )
    .await
    .expect("create product")
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

/// Build an order payload from `(product_id, quantity, price)` triples.
pub fn order_payload(items: &[(i64, i64, &str)]) -> OrderCreate {
    OrderCreate {
        items: items
            .iter()
            .map(|&(product_id, quantity, price)| OrderItemInput {
                product_id,
                quantity,
                price: dec(price),
            })
            .collect(),
    }
}

// ========================================================================
// HTTP helpers (in-process oneshot against the full middleware stack)
// ========================================================================

/// The application as served, ready for oneshot calls.
pub fn test_app(state: &ServerState) -> Router {
    build_app(state).with_state(state.clone())
}

/// Issue a bearer token for `user` signed by this state's JWT service.
pub fn token_for(state: &ServerState, user: &CurrentUser) -> String {
    state
        .jwt_service
        .generate_token(user.id, &user.name, &user.roles, &user.permissions)
        .expect("generate token")
}

/// One in-process request; returns the status and the parsed JSON body.
pub async fn api_call(
    app: &Router,
    method: http::Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (http::StatusCode, serde_json::Value) {
    let mut request = http::Request::builder().method(method).uri(path);
    if let Some(token) = token {
        request = request.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => request
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => request.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}
