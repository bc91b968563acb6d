//! Notification API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::notification;
use crate::utils::AppResult;
use shared::models::NotificationList;
use shared::response::MessageResponse;

/// GET /api/notifications - the caller's notifications plus the unread subset
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<NotificationList>> {
    let notifications = notification::find_by_user(&state.pool, user.id).await?;
    let unread_notifications = notifications
        .iter()
        .filter(|n| !n.is_read())
        .cloned()
        .collect();
    Ok(Json(NotificationList {
        notifications,
        unread_notifications,
    }))
}

/// POST /api/notifications/mark-as-read - mark all unread notifications read
pub async fn mark_as_read(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<MessageResponse>> {
    let updated = notification::mark_all_read(&state.pool, user.id).await?;
    tracing::debug!(user_id = user.id, updated, "Notifications marked as read");
    Ok(Json(MessageResponse::new("Notifications marked as read")))
}
