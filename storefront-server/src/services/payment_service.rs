//! Payment Service - intent creation and confirmation
//!
//! Follows the two-step card flow: an intent is created for an amount,
//! then confirmed with a payment method in a second call. The processor
//! sits behind [`PaymentGateway`] so the service logic stays the same
//! whichever backend issues the secrets.

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{
    PaymentConfirm, PaymentConfirmed, PaymentIntentCreate, PaymentIntentCreated, PaymentStatus,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::repository::payment;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Identifiers issued by the processor for a new intent.
#[derive(Debug, Clone)]
pub struct GatewayIntent {
    pub id: String,
    pub client_secret: String,
}

/// The payment processor behind the intent flow.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register a new intent with the processor.
    async fn create_intent(&self, amount: i64, currency: &str) -> AppResult<GatewayIntent>;

    /// Confirm the intent with the processor.
    async fn confirm_intent(&self, intent_id: &str, payment_method: &str) -> AppResult<()>;
}

/// Gateway that approves everything locally.
///
/// Stands in for a real processor in development and tests; secrets are
/// random and carry no meaning beyond being unguessable.
pub struct ManualGateway;

#[async_trait]
impl PaymentGateway for ManualGateway {
    async fn create_intent(&self, _amount: i64, _currency: &str) -> AppResult<GatewayIntent> {
        let id = format!("pi_{}", Uuid::new_v4().simple());
        let client_secret = format!("{id}_secret_{}", Uuid::new_v4().simple());
        Ok(GatewayIntent { id, client_secret })
    }

    async fn confirm_intent(&self, _intent_id: &str, _payment_method: &str) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct PaymentService {
    pool: SqlitePool,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_gateway(pool, Arc::new(ManualGateway))
    }

    pub fn with_gateway(pool: SqlitePool, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { pool, gateway }
    }

    /// Create a payment intent for an amount in cents.
    pub async fn create_intent(
        &self,
        data: PaymentIntentCreate,
    ) -> AppResult<PaymentIntentCreated> {
        // 1. Register the intent with the gateway
        let currency = data.currency.as_deref().unwrap_or("usd");
        let intent = self.gateway.create_intent(data.amount, currency).await?;

        // 2. Persist it awaiting confirmation
        let stored = payment::create(
            &self.pool,
            &intent.id,
            &intent.client_secret,
            data.amount,
            currency,
        )
        .await?;

        Ok(PaymentIntentCreated {
            client_secret: stored.client_secret,
            payment_intent_id: stored.id,
        })
    }

    /// Confirm a previously created intent with a payment method.
    pub async fn confirm(&self, data: PaymentConfirm) -> AppResult<PaymentConfirmed> {
        // 1. The intent must exist
        let intent = payment::find_by_id(&self.pool, &data.payment_intent_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::PaymentNotFound, "Payment intent not found")
            })?;

        // 2. Confirming twice is a conflict
        if intent.status == PaymentStatus::Succeeded {
            return Err(AppError::new(ErrorCode::PaymentAlreadyConfirmed));
        }

        // 3. Confirm with the gateway, then record method and status
        self.gateway
            .confirm_intent(&intent.id, &data.payment_method)
            .await?;
        let updated = payment::mark_succeeded(&self.pool, &intent.id, &data.payment_method).await?;
        if !updated {
            // Lost a race with a concurrent confirmation
            return Err(AppError::new(ErrorCode::PaymentAlreadyConfirmed));
        }

        Ok(PaymentConfirmed {
            status: PaymentStatus::Succeeded,
        })
    }
}
