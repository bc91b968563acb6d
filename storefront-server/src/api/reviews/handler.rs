//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResult, Validated};
use shared::models::{ProductReviews, Review, ReviewCreate};
use shared::response::MessageResponse;

/// POST /api/products/{product_id}/reviews - submit a review
pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<i64>,
    Validated(payload): Validated<ReviewCreate>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let response = state.reviews.submit_review(&user, product_id, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/products/{product_id}/reviews - approved reviews with average rating
pub async fn product_reviews(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<ProductReviews>> {
    let reviews = state.reviews.product_reviews(product_id).await?;
    Ok(Json(reviews))
}

/// GET /api/reviews/pending - reviews awaiting moderation
pub async fn pending(State(state): State<ServerState>) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.reviews.pending_reviews().await?;
    Ok(Json(reviews))
}

/// PATCH /api/reviews/{id}/approve - approve a pending review
pub async fn approve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(user_id = user.id, review_id = id, "Approving review");
    let response = state.reviews.approve_review(id).await?;
    Ok(Json(response))
}

/// PATCH /api/reviews/{id}/reject - reject a pending review
pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!(user_id = user.id, review_id = id, "Rejecting review");
    let response = state.reviews.reject_review(id).await?;
    Ok(Json(response))
}
