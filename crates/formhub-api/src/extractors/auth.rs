//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, verifies it, and resolves the user it names.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use formhub_core::error::AppError;
use formhub_service::AuthSession;
use formhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Context passed into service calls.
    pub ctx: RequestContext,
    /// The resolved user and the token the request was made with.
    pub session: AuthSession,
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("No authorization token provided"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let session = state.auth_service.authenticate(token).await?;

        Ok(AuthUser {
            ctx: RequestContext::new(session.user.id, session.user.username.clone()),
            session,
        })
    }
}
