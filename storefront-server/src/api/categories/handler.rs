//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, category};
use crate::utils::{AppError, AppResult, ErrorCode, Validated};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::response::MessageResponse;

/// GET /api/categories - list all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id} - fetch one category
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::CategoryNotFound, "Category not found"))?;
    Ok(Json(category))
}

/// POST /api/categories - create a category
pub async fn create(
    State(state): State<ServerState>,
    Validated(payload): Validated<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let category = category::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::CategoryNameExists),
            other => other.into(),
        })?;
    Ok(Json(category))
}

/// PUT /api/categories/{id} - update a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Validated(payload): Validated<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let category = category::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::with_message(ErrorCode::CategoryNotFound, "Category not found")
            }
            RepoError::Duplicate(_) => AppError::new(ErrorCode::CategoryNameExists),
            other => other.into(),
        })?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id} - delete a category
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = category::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            "Category not found",
        ));
    }
    Ok(Json(MessageResponse::new("Category deleted")))
}
