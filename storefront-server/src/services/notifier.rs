//! Notifier - user notification delivery
//!
//! Writes notification rows for the events the server emits: order status
//! changes, new reviews on a vendor's product and new products in the
//! catalog. Callers treat delivery as best-effort; a failed notification
//! is logged and never fails the operation that triggered it.

use std::time::Duration;

use serde_json::json;
use shared::models::{Notification, Order, Product, Review, kind};
use sqlx::SqlitePool;
use tracing::warn;

use crate::cache::TtlCache;
use crate::db::repository::{RepoResult, notification, user};

/// Window during which a repeated review notification for the same vendor
/// and review is dropped.
const REVIEW_DEDUP_TTL: Duration = Duration::from_secs(600);

#[derive(Clone)]
pub struct Notifier {
    pool: SqlitePool,
    review_dedup: TtlCache<String, ()>,
}

impl Notifier {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            review_dedup: TtlCache::new(REVIEW_DEDUP_TTL),
        }
    }

    /// Tell the order's owner that the order status changed.
    pub async fn order_status_changed(&self, order: &Order) -> RepoResult<Notification> {
        let data = json!({
            "order_id": order.id,
            "status": order.status,
            "message": format!("Your order status has been updated to {}", order.status),
        });
        notification::create(&self.pool, order.user_id, kind::ORDER_STATUS, &data).await
    }

    /// Tell the product's vendor that a review was posted.
    ///
    /// Repeat deliveries for the same review are suppressed for
    /// [`REVIEW_DEDUP_TTL`]; returns `None` when suppressed.
    pub async fn product_reviewed(
        &self,
        vendor_id: i64,
        review: &Review,
    ) -> RepoResult<Option<Notification>> {
        let dedup_key = format!("product_owner_{vendor_id}_review_{}", review.id);
        if self.review_dedup.get(&dedup_key).is_some() {
            return Ok(None);
        }

        let data = json!({
            "review_id": review.id,
            "product_id": review.product_id,
            "review": review.review,
            "message": "A new review has been posted for your product.",
        });
        let notification =
            notification::create(&self.pool, vendor_id, kind::PRODUCT_REVIEWED, &data).await?;
        self.review_dedup.insert(dedup_key, ());
        Ok(Some(notification))
    }

    /// Announce a new product to every user.
    ///
    /// Returns the number of notifications written; per-user failures are
    /// logged and skipped so one bad row cannot block the rest.
    pub async fn product_created(&self, product: &Product) -> RepoResult<usize> {
        let user_ids = user::all_ids(&self.pool).await?;
        let data = json!({
            "product_id": product.id,
            "name": product.name,
            "message": format!("A new product has been added: {}", product.name),
        });

        let results = futures::future::join_all(
            user_ids
                .iter()
                .map(|&user_id| notification::create(&self.pool, user_id, kind::NEW_PRODUCT, &data)),
        )
        .await;

        let mut delivered = 0;
        for result in results {
            match result {
                Ok(_) => delivered += 1,
                Err(err) => {
                    warn!(product_id = product.id, error = %err, "New product notification failed")
                }
            }
        }
        Ok(delivered)
    }
}
