//! Payment Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Payment intent status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentStatus {
    RequiresConfirmation,
    Succeeded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentStatus::Succeeded => "succeeded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment intent entity
///
/// Intents use manual confirmation: created first, then confirmed with a
/// payment method in a second call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    /// Amount in cents
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payment intent payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentIntentCreate {
    /// Amount in cents
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i64,
    pub currency: Option<String>,
}

/// Confirm payment intent payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentConfirm {
    #[validate(length(min = 1, message = "payment_intent_id is required"))]
    pub payment_intent_id: String,
    #[validate(length(min = 1, message = "payment_method is required"))]
    pub payment_method: String,
}

/// Response for a freshly created intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentCreated {
    pub client_secret: String,
    pub payment_intent_id: String,
}

/// Response for a confirmed intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmed {
    pub status: PaymentStatus,
}
