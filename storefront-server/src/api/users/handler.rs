//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{RoleAssign, RoleChanged, RolesResponse, User};

/// GET /api/user - the authenticated user's profile
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<User>> {
    let profile = user::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(profile))
}

/// GET /api/user/roles - the authenticated user's role names
pub async fn my_roles(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<RolesResponse>> {
    let roles = user::roles_for_user(&state.pool, user.id).await?;
    Ok(Json(RolesResponse { roles }))
}

/// POST /api/users/{id}/assign-role - grant a role (admin)
pub async fn assign_role(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoleAssign>,
) -> AppResult<Json<RoleChanged>> {
    user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    user::assign_role(&state.pool, id, payload.role).await?;
    tracing::info!(
        admin_id = admin.id,
        user_id = id,
        role = %payload.role,
        "Role assigned"
    );

    // Re-fetch so the response carries the updated role list
    let user = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(RoleChanged {
        message: "Role assigned successfully".to_string(),
        user,
    }))
}

/// POST /api/users/{id}/remove-role - revoke a role (admin)
pub async fn remove_role(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoleAssign>,
) -> AppResult<Json<RoleChanged>> {
    user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let removed = user::remove_role(&state.pool, id, payload.role).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::RoleNotAssigned));
    }
    tracing::info!(
        admin_id = admin.id,
        user_id = id,
        role = %payload.role,
        "Role removed"
    );

    let user = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(RoleChanged {
        message: "Role removed successfully".to_string(),
        user,
    }))
}
