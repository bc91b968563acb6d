//! Review Service - submission, moderation and product review pages
//!
//! Submissions are screened against a spam keyword list: clean reviews go
//! live immediately, flagged ones wait in `pending` until a moderator
//! decides. The per-product review page is cached and dropped on every
//! change that could alter it.

use std::time::Duration;

use shared::models::{ProductReviews, Review, ReviewCreate, ReviewStatus};
use shared::response::MessageResponse;
use sqlx::SqlitePool;
use tracing::warn;

use super::{Notifier, spam};
use crate::auth::CurrentUser;
use crate::cache::TtlCache;
use crate::db::repository::{product, review};
use crate::utils::{AppError, AppResult, ErrorCode};

/// How long a cached product review page stays valid.
const REVIEWS_CACHE_TTL: Duration = Duration::from_secs(600);

fn reviews_cache_key(product_id: i64) -> String {
    format!("product_reviews_{product_id}")
}

#[derive(Clone)]
pub struct ReviewService {
    pool: SqlitePool,
    notifier: Notifier,
    cache: TtlCache<String, ProductReviews>,
}

impl ReviewService {
    pub fn new(pool: SqlitePool, notifier: Notifier) -> Self {
        Self {
            pool,
            notifier,
            cache: TtlCache::new(REVIEWS_CACHE_TTL),
        }
    }

    /// Submit a review for a product on behalf of `actor`.
    ///
    /// Clean reviews are approved on the spot; flagged ones are held
    /// `pending` for moderation. The product's vendor is notified.
    pub async fn submit_review(
        &self,
        actor: &CurrentUser,
        product_id: i64,
        data: ReviewCreate,
    ) -> AppResult<MessageResponse> {
        // 1. The product must exist
        let product = product::find_by_id(&self.pool, product_id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::ProductNotFound, "Product not found"))?;

        // 2. Screen the text; spam is held for moderation
        let is_spam = spam::is_spam(&data.review);
        let status = if is_spam {
            ReviewStatus::Pending
        } else {
            ReviewStatus::Approved
        };

        // 3. Write the review
        let review = review::create(
            &self.pool,
            product_id,
            actor.id,
            &data.review,
            data.rating,
            is_spam,
            status,
        )
        .await?;

        // 4. Approved reviews feed the stored product rating
        if review.status == ReviewStatus::Approved {
            product::refresh_rating(&self.pool, product_id).await?;
        }

        // 5. Tell the vendor; delivery failure never fails the submission
        if let Err(err) = self.notifier.product_reviewed(product.vendor_id, &review).await {
            warn!(review_id = review.id, error = %err, "Review notification failed");
        }

        // 6. Drop the cached review page
        self.cache.remove(&reviews_cache_key(product_id));

        Ok(MessageResponse::new("Review submitted successfully"))
    }

    /// Approved reviews for a product plus their average rating, cached.
    pub async fn product_reviews(&self, product_id: i64) -> AppResult<ProductReviews> {
        let key = reviews_cache_key(product_id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let reviews = review::find_approved_by_product(&self.pool, product_id).await?;
        let average_rating = review::average_rating(&self.pool, product_id).await?;
        let page = ProductReviews {
            reviews,
            average_rating,
        };
        self.cache.insert(key, page.clone());
        Ok(page)
    }

    /// Reviews waiting for moderation, oldest first.
    pub async fn pending_reviews(&self) -> AppResult<Vec<Review>> {
        Ok(review::find_pending(&self.pool).await?)
    }

    pub async fn approve_review(&self, review_id: i64) -> AppResult<MessageResponse> {
        let review = self.moderate(review_id, ReviewStatus::Approved).await?;
        // Approval changes the stored aggregate
        product::refresh_rating(&self.pool, review.product_id).await?;
        Ok(MessageResponse::new("Review approved successfully"))
    }

    pub async fn reject_review(&self, review_id: i64) -> AppResult<MessageResponse> {
        self.moderate(review_id, ReviewStatus::Rejected).await?;
        Ok(MessageResponse::new("Review rejected successfully"))
    }

    /// Shared moderation path: only pending reviews take a decision.
    async fn moderate(&self, review_id: i64, decision: ReviewStatus) -> AppResult<Review> {
        // 1. Load the review
        let review = review::find_by_id(&self.pool, review_id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::ReviewNotFound, "Review not found"))?;

        // 2. Only pending reviews are open for a decision
        if review.status != ReviewStatus::Pending {
            return Err(AppError::with_message(
                ErrorCode::ReviewNotPending,
                format!("Review is already {}", review.status),
            ));
        }

        // 3. Write the decision
        review::set_status(&self.pool, review_id, decision).await?;

        // 4. Drop the cached review page
        self.cache.remove(&reviews_cache_key(review.product_id));

        Ok(review)
    }
}
