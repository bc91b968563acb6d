//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResult, Validated};
use shared::models::{Order, OrderCreate, OrderStatusUpdate};
use shared::request::PaginationQuery;
use shared::response::PaginatedResponse;

/// GET /api/orders - list the caller's orders (all orders for admins)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(pagination): Query<PaginationQuery>,
) -> AppResult<Json<PaginatedResponse<Order>>> {
    let orders = state.orders.list_orders(&user, &pagination).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - fetch one of the caller's orders
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get_order(&user, id).await?;
    Ok(Json(order))
}

/// POST /api/orders - create an order from line items
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Validated(payload): Validated<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.create_order(&user, payload).await?;
    Ok(Json(order))
}

/// PATCH /api/orders/{id}/cancel - cancel a pending order
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.orders.cancel_order(&user, id).await?;
    Ok(Json(order))
}

/// PUT /api/orders/{id} - move an order to a new status
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .update_order_status(&user, id, payload.status)
        .await?;
    Ok(Json(order))
}
