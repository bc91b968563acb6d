//! Notification Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification kinds emitted by the server
pub mod kind {
    pub const ORDER_STATUS: &str = "order_status";
    pub const PRODUCT_REVIEWED: &str = "product_reviewed";
    pub const NEW_PRODUCT: &str = "new_product";
}

/// Notification entity
///
/// `data` is a kind-specific JSON payload, e.g. for `order_status`:
/// `{"order_id": 1, "status": "completed", "message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub data: serde_json::Value,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// All notifications for a user plus the unread subset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread_notifications: Vec<Notification>,
}
