//! Review Repository

use chrono::Utc;
use shared::models::{Review, ReviewStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str =
    "id, product_id, user_id, review, rating, is_spam, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let review =
        sqlx::query_as::<_, Review>(&format!("SELECT {COLUMNS} FROM reviews WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(review)
}

/// Reviews shown on a product page. Spam submissions never reach
/// `approved` status, so filtering on status alone is enough.
pub async fn find_approved_by_product(
    pool: &SqlitePool,
    product_id: i64,
) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(&format!(
        "SELECT {COLUMNS} FROM reviews WHERE product_id = ? AND status = 'approved' ORDER BY created_at DESC, id DESC"
    ))
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

/// Average rating over approved reviews. `None` when there are none.
pub async fn average_rating(pool: &SqlitePool, product_id: i64) -> RepoResult<Option<f64>> {
    let avg = sqlx::query_scalar::<_, Option<f64>>(
        "SELECT AVG(rating) FROM reviews WHERE product_id = ? AND status = 'approved'",
    )
    .bind(product_id)
    .fetch_one(pool)
    .await?;
    Ok(avg)
}

/// Reviews awaiting moderation, oldest first.
pub async fn find_pending(pool: &SqlitePool) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(&format!(
        "SELECT {COLUMNS} FROM reviews WHERE status = 'pending' ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn create(
    pool: &SqlitePool,
    product_id: i64,
    user_id: i64,
    review: &str,
    rating: i64,
    is_spam: bool,
    status: ReviewStatus,
) -> RepoResult<Review> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO reviews (product_id, user_id, review, rating, is_spam, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(product_id)
    .bind(user_id)
    .bind(review)
    .bind(rating)
    .bind(is_spam)
    .bind(status)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: ReviewStatus) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE reviews SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
