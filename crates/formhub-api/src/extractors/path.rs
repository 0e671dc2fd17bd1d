//! Typed path parameters whose rejections use the API error shape.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use formhub_core::error::AppError;

use crate::error::ApiError;

/// Like [`Path`], but a segment that does not parse (for instance a
/// malformed id) becomes a `VALIDATION_ERROR` response.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_error)?;
        Ok(Self(value))
    }
}

fn path_error(rejection: PathRejection) -> ApiError {
    if rejection.status().is_server_error() {
        return AppError::internal(rejection.body_text()).into();
    }
    AppError::validation(rejection.body_text()).into()
}
