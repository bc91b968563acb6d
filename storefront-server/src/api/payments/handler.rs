//! Payment API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResult, Validated};
use shared::models::{PaymentConfirm, PaymentConfirmed, PaymentIntentCreate, PaymentIntentCreated};

/// POST /api/payments/intent - create a payment intent
pub async fn create_intent(
    State(state): State<ServerState>,
    user: CurrentUser,
    Validated(payload): Validated<PaymentIntentCreate>,
) -> AppResult<(StatusCode, Json<PaymentIntentCreated>)> {
    tracing::info!(user_id = user.id, amount = payload.amount, "Creating payment intent");
    let intent = state.payments.create_intent(payload).await?;
    Ok((StatusCode::CREATED, Json(intent)))
}

/// POST /api/payments/confirm - confirm a pending payment intent
pub async fn confirm(
    State(state): State<ServerState>,
    user: CurrentUser,
    Validated(payload): Validated<PaymentConfirm>,
) -> AppResult<Json<PaymentConfirmed>> {
    tracing::info!(user_id = user.id, "Confirming payment intent");
    let confirmed = state.payments.confirm(payload).await?;
    Ok(Json(confirmed))
}
