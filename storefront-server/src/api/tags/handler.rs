//! Tag API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, tag};
use crate::utils::{AppError, AppResult, ErrorCode, Validated};
use shared::models::{Tag, TagCreate, TagUpdate};
use shared::response::MessageResponse;

/// GET /api/tags - list all tags
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = tag::find_all(&state.pool).await?;
    Ok(Json(tags))
}

/// GET /api/tags/{id} - fetch one tag
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Tag>> {
    let tag = tag::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::TagNotFound, "Tag not found"))?;
    Ok(Json(tag))
}

/// POST /api/tags - create a tag
pub async fn create(
    State(state): State<ServerState>,
    Validated(payload): Validated<TagCreate>,
) -> AppResult<Json<Tag>> {
    let tag = tag::create(&state.pool, payload).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::TagNameExists),
        other => other.into(),
    })?;
    Ok(Json(tag))
}

/// PUT /api/tags/{id} - update a tag
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Validated(payload): Validated<TagUpdate>,
) -> AppResult<Json<Tag>> {
    let tag = tag::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::with_message(ErrorCode::TagNotFound, "Tag not found")
            }
            RepoError::Duplicate(_) => AppError::new(ErrorCode::TagNameExists),
            other => other.into(),
        })?;
    Ok(Json(tag))
}

/// DELETE /api/tags/{id} - delete a tag
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = tag::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::TagNotFound,
            "Tag not found",
        ));
    }
    Ok(Json(MessageResponse::new("Tag deleted")))
}
