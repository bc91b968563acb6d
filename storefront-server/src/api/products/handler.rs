//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResult, Validated};
use shared::models::{Product, ProductCreate, ProductFilter, ProductSearchQuery, ProductUpdate};
use shared::request::PaginationQuery;
use shared::response::{MessageResponse, PaginatedResponse};

/// GET /api/products - role-scoped product listing
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(pagination): Query<PaginationQuery>,
) -> AppResult<Json<PaginatedResponse<Product>>> {
    let products = state.catalog.list_products(&user, &pagination).await?;
    Ok(Json(products))
}

/// GET /api/products/search?query=... - keyword search
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<ProductSearchQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog.search_products(&query.query).await?;
    Ok(Json(products))
}

/// POST /api/products/filter - filtered listing
///
/// Filter clauses travel in the body, pagination in the query string.
pub async fn filter(
    State(state): State<ServerState>,
    Query(pagination): Query<PaginationQuery>,
    Json(filter): Json<ProductFilter>,
) -> AppResult<Json<PaginatedResponse<Product>>> {
    let products = state.catalog.filter_products(&filter, &pagination).await?;
    Ok(Json(products))
}

/// GET /api/products/{id} - fetch one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.get_product(id).await?;
    Ok(Json(product))
}

/// POST /api/products - create a product owned by the caller
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Validated(payload): Validated<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.create_product(&user, payload).await?;
    Ok(Json(product))
}

/// PUT /api/products/{id} - update a product the caller owns
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Validated(payload): Validated<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.update_product(&user, id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} - delete a product the caller owns
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.catalog.delete_product(&user, id).await?;
    Ok(Json(message))
}
