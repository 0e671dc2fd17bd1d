//! JSON body extractor whose rejections use the API error shape.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use formhub_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but a missing content type or an unparsable body becomes
/// a `VALIDATION_ERROR` response.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_error)?;
        Ok(Self(value))
    }
}

fn json_error(rejection: JsonRejection) -> ApiError {
    if rejection.status().is_server_error() {
        return AppError::internal(rejection.body_text()).into();
    }
    AppError::validation(format!("Invalid request body: {}", rejection.body_text())).into()
}
