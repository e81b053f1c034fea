pub mod health;
pub mod hive_sections;
pub mod hives;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::error::ApiError;

/// Uniform boundary rule: every id path segment must be a positive integer.
/// Anything below 1 is rejected as a validation failure before the service
/// is consulted.
pub(crate) fn ensure_positive_id(name: &str, id: i32) -> Result<(), ApiError> {
    if id < 1 {
        return Err(ApiError::Validation(format!(
            "{name} must be a positive integer"
        )));
    }
    Ok(())
}

/// JSON body extractor that reports malformed or incomplete bodies as 400
/// instead of axum's default 422.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::Validation(rejection.body_text()))?;

        Ok(ApiJson(value))
    }
}
