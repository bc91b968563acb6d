//! Payment Intent Repository

use chrono::Utc;
use shared::models::{PaymentIntent, PaymentStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str =
    "id, client_secret, amount, currency, status, payment_method, created_at, updated_at";

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    client_secret: &str,
    amount: i64,
    currency: &str,
) -> RepoResult<PaymentIntent> {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO payment_intents (id, client_secret, amount, currency, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(client_secret)
    .bind(amount)
    .bind(currency)
    .bind(PaymentStatus::RequiresConfirmation)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment intent".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<PaymentIntent>> {
    let intent = sqlx::query_as::<_, PaymentIntent>(&format!(
        "SELECT {COLUMNS} FROM payment_intents WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(intent)
}

/// Confirm an intent that is still awaiting confirmation.
///
/// Guarded on the current status; returns `false` when the intent was
/// already confirmed (or does not exist).
pub async fn mark_succeeded(
    pool: &SqlitePool,
    id: &str,
    payment_method: &str,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE payment_intents SET status = ?, payment_method = ?, updated_at = ? WHERE id = ? AND status = ?",
    )
    .bind(PaymentStatus::Succeeded)
    .bind(payment_method)
    .bind(Utc::now())
    .bind(id)
    .bind(PaymentStatus::RequiresConfirmation)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}
