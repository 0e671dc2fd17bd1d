//! Session issuer: stateless bearer tokens bound to a user id.
//!
//! There is no server-side session table and no revocation list. Logging
//! out only tells the client to discard its token; a captured token stays
//! valid until it expires.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use formhub_core::config::AuthConfig;
use formhub_core::error::AppError;
use formhub_core::types::UserId;

use crate::jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};

/// Mints and validates session tokens.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl SessionIssuer {
    /// Creates an issuer signing with the configured secret.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Issues a fresh token for the user.
    pub fn issue(&self, user_id: UserId) -> Result<IssuedToken, AppError> {
        let issued = self.encoder.issue(user_id)?;
        debug!(user_id = %user_id, expires_at = %issued.expires_at, "Session token issued");
        Ok(issued)
    }

    /// Issues a token with an explicit issue time.
    pub fn issue_at(
        &self,
        user_id: UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        self.encoder.issue_at(user_id, issued_at)
    }

    /// Returns the user a token was issued to.
    ///
    /// Checks signature and expiry only. Whether the user still exists is
    /// the caller's concern.
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        Ok(self.claims(token)?.user_id())
    }

    /// Returns the full claims of a valid token.
    pub fn claims(&self, token: &str) -> Result<Claims, AppError> {
        self.decoder.decode(token)
    }

    /// Records a logout. The token itself is not invalidated.
    pub fn revoke_client_side(&self, user_id: UserId) {
        info!(user_id = %user_id, "User logged out; token discarded client-side");
    }
}
