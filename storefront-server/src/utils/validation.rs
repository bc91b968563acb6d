//! Input validation
//!
//! JSON extractor that runs `validator::Validate` rules on the payload before
//! the handler sees it. Failed rules are reported per field in the error
//! details so clients can highlight the offending inputs.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::utils::AppError;

/// JSON body that has passed validation
///
/// Drop-in replacement for `Json<T>` in handlers. Returns 400 with field-level
/// details when a rule fails.
///
/// ```ignore
/// async fn create(
///     State(state): State<ServerState>,
///     Validated(payload): Validated<CategoryCreate>,
/// ) -> AppResult<Json<Category>> {
///     // payload satisfies every rule on CategoryCreate
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                AppError::invalid_request(rejection.body_text())
            })?;

        value
            .validate()
            .map_err(|errors| validation_error(&errors))?;

        Ok(Validated(value))
    }
}

fn validation_error(errors: &validator::ValidationErrors) -> AppError {
    let mut err = AppError::validation("Request validation failed");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{field}'"))
            })
            .collect();
        err = err.with_detail(field.to_string(), serde_json::json!(messages));
    }
    err
}
