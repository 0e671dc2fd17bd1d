//! Credential store: registration, login checks, and identity changes.

use std::sync::Arc;

use tracing::{info, warn};

use formhub_core::config::AuthConfig;
use formhub_core::error::AppError;
use formhub_core::result::AppResult;
use formhub_core::types::UserId;
use formhub_database::UserStore;
use formhub_entity::user::{CreateUser, UpdateProfile, User};

use crate::password::{PasswordHasher, PasswordValidator};

/// Message for every failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// New account details.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Identity fields to change; `None` or a blank value keeps the current one.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Owns user identities and their password hashes.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("validator", &self.validator)
            .finish()
    }
}

impl CredentialStore {
    /// Creates a credential store over the given user persistence.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
        }
    }

    /// The password policy applied to new passwords.
    pub fn validator(&self) -> &PasswordValidator {
        &self.validator
    }

    /// Creates an account. `Conflict` if the email or username is taken.
    pub async fn register(&self, registration: &Registration) -> AppResult<User> {
        let username = registration.username.trim();
        let email = normalize_email(&registration.email);
        if username.is_empty() || email.is_empty() || registration.password.is_empty() {
            return Err(AppError::validation("All fields are required"));
        }
        self.validator.validate(&registration.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&registration.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Returns the user owning these credentials.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            self.hasher.verify_without_account(password);
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    /// Replaces the password after re-checking the current one.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.resolve(user_id).await?;
        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }
        self.validator.validate(new_password)?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &password_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Changes username and/or email. Blank or absent values keep the
    /// current ones; collisions count only against other users.
    pub async fn update_profile(&self, user_id: UserId, changes: &ProfileChanges) -> AppResult<User> {
        let user = self.resolve(user_id).await?;

        let username = changes
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| user.username.clone(), str::to_string);
        let email = changes
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| user.email.clone());

        if let Some(other) = self.users.find_by_email(&email).await? {
            if other.id != user_id {
                return Err(AppError::conflict("Email already in use"));
            }
        }
        if let Some(other) = self.users.find_by_username(&username).await? {
            if other.id != user_id {
                return Err(AppError::conflict("Username already taken"));
            }
        }

        let updated = self
            .users
            .update_profile(user_id, &UpdateProfile { username, email })
            .await?;
        info!(user_id = %user_id, "Profile updated");
        Ok(updated)
    }

    /// Loads a user by id.
    pub async fn resolve(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Whether an account uses this email.
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .is_some())
    }
}
