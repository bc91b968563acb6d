//! Authentication Handlers
//!
//! Registration and login. Login failures use one unified error message
//! and a fixed delay so responses leak neither which part was wrong nor
//! whether the email exists.

use std::time::Duration;

use axum::{Json, extract::State};
use http::StatusCode;

use crate::auth::{password, permissions_for_roles};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode, Validated};
use shared::models::{LoginRequest, RegisterRequest, TokenResponse, UserRole};
use shared::response::MessageResponse;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - create an account
///
/// Every new account starts with the customer role.
pub async fn register(
    State(state): State<ServerState>,
    Validated(req): Validated<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let password_hash = password::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let user = user::create(&state.pool, &req.name, &req.email, &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
            other => other.into(),
        })?;

    user::assign_role(&state.pool, user.id, UserRole::Customer).await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /api/auth/login - authenticate and issue a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Validated(req): Validated<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let credentials = user::credentials_by_email(&state.pool, &req.email).await?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let (user_id, password_hash) = match credentials {
        Some(found) => found,
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let password_valid = password::verify_password(&req.password, &password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        security_log!(
            "WARN",
            "login_failed",
            email = req.email.clone(),
            reason = "invalid_credentials"
        );
        return Err(AppError::invalid_credentials());
    }

    // Roles and their grants are baked into the token
    let user = user::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::internal("User row vanished during login"))?;
    let permissions = permissions_for_roles(&user.roles);
    let token = state
        .jwt_service
        .generate_token(user.id, &user.name, &user.roles, &permissions)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(TokenResponse::bearer(
        token,
        state.jwt_service.expires_in_seconds(),
    )))
}
