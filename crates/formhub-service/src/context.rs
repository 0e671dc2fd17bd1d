//! Request context carrying the authenticated user.

use formhub_core::types::UserId;

/// Who is acting on the current request.
///
/// Built by the API layer once the bearer token and its user have been
/// resolved, then passed into service methods so their logs name the actor.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The username at the time of the request.
    pub username: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}
