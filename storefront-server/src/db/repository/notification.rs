//! Notification Repository
//!
//! The `data` column holds the notification payload as JSON text; its shape
//! varies per notification kind.

use chrono::Utc;
use shared::models::Notification;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, user_id, kind, data, read_at, created_at";

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    kind: &str,
    data: &serde_json::Value,
) -> RepoResult<Notification> {
    let result = sqlx::query(
        "INSERT INTO notifications (user_id, kind, data, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(kind)
    .bind(data)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    let notification =
        sqlx::query_as::<_, Notification>(&format!("SELECT {COLUMNS} FROM notifications WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    notification.ok_or_else(|| RepoError::Database("Failed to create notification".into()))
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {COLUMNS} FROM notifications WHERE user_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(notifications)
}

pub async fn unread_count(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read_at IS NULL",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Mark every unread notification for the user as read. Returns how many
/// rows were touched.
pub async fn mark_all_read(pool: &SqlitePool, user_id: i64) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE notifications SET read_at = ? WHERE user_id = ? AND read_at IS NULL",
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
