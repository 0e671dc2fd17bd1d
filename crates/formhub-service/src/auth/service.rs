//! Account lifecycle: register, login, logout, and identity changes.
//!
//! Every operation that changes who the user is hands back a fresh token,
//! so clients can replace the one they hold.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use formhub_auth::{CredentialStore, ProfileChanges, Registration, SessionIssuer};
use formhub_core::result::AppResult;
use formhub_entity::user::User;

use crate::context::RequestContext;

/// A user together with a freshly issued session token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Orchestrates the credential store and the session issuer.
#[derive(Debug, Clone)]
pub struct AuthService {
    credentials: Arc<CredentialStore>,
    sessions: Arc<SessionIssuer>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(credentials: Arc<CredentialStore>, sessions: Arc<SessionIssuer>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Registers a new account and signs it in.
    pub async fn register(
        &self,
        registration: &Registration,
        confirm_password: &str,
    ) -> AppResult<AuthSession> {
        self.credentials
            .validator()
            .validate_confirmation(&registration.password, confirm_password)?;
        let user = self.credentials.register(registration).await?;
        self.session_for(user)
    }

    /// Checks credentials and issues a session token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self.credentials.verify_credentials(email, password).await?;
        info!(user_id = %user.id, "User logged in");
        self.session_for(user)
    }

    /// Ends a session on the client side only.
    pub fn logout(&self, ctx: &RequestContext) {
        self.sessions.revoke_client_side(ctx.user_id);
    }

    /// Resolves a bearer token to the session it represents.
    ///
    /// `Unauthorized` for a bad or expired token, `NotFound` if the user
    /// it names no longer exists.
    pub async fn authenticate(&self, token: &str) -> AppResult<AuthSession> {
        let claims = self.sessions.claims(token)?;
        let user = self.credentials.resolve(claims.user_id()).await?;
        Ok(AuthSession {
            user,
            token: token.to_string(),
            expires_at: claims.expires_at(),
        })
    }

    /// Changes the password and issues a replacement token.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<AuthSession> {
        self.credentials
            .change_password(ctx.user_id, current_password, new_password)
            .await?;
        let user = self.credentials.resolve(ctx.user_id).await?;
        self.session_for(user)
    }

    /// Changes username and/or email and issues a replacement token.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        changes: &ProfileChanges,
    ) -> AppResult<AuthSession> {
        let user = self.credentials.update_profile(ctx.user_id, changes).await?;
        self.session_for(user)
    }

    /// Whether an account already uses this email.
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.credentials.email_exists(email).await
    }

    fn session_for(&self, user: User) -> AppResult<AuthSession> {
        let issued = self.sessions.issue(user.id)?;
        Ok(AuthSession {
            user,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}
