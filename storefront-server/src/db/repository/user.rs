//! User Repository
//!
//! Users load with their role names attached. The password hash never leaves
//! this module except through [`credentials_by_email`] for login checks.

use chrono::Utc;
use shared::models::{User, UserRole};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, role};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at, updated_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(mut user) => {
            user.roles = roles_for_user(pool, user.id).await?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, created_at, updated_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(mut user) => {
            user.roles = roles_for_user(pool, user.id).await?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

/// Fetch the user id and stored password hash for a login attempt.
pub async fn credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> RepoResult<Option<(i64, String)>> {
    let row = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> RepoResult<User> {
    if find_by_email(pool, email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Email '{email}' is already registered"
        )));
    }

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO users (name, email, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn all_ids(pool: &SqlitePool) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

pub async fn roles_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<UserRole>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT r.name FROM roles r JOIN user_roles ur ON ur.role_id = r.id WHERE ur.user_id = ? ORDER BY r.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(names.iter().filter_map(|n| UserRole::parse(n)).collect())
}

pub async fn assign_role(pool: &SqlitePool, user_id: i64, role: UserRole) -> RepoResult<()> {
    let role_row = role::find_by_name(pool, role.as_str())
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Role '{role}' not found")))?;

    sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(role_row.id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove a role from a user. Returns `false` when the user did not hold it.
pub async fn remove_role(pool: &SqlitePool, user_id: i64, role: UserRole) -> RepoResult<bool> {
    let result = sqlx::query(
        "DELETE FROM user_roles WHERE user_id = ? AND role_id = (SELECT id FROM roles WHERE name = ?)",
    )
    .bind(user_id)
    .bind(role.as_str())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
