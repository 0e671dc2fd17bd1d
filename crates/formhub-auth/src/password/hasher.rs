//! Password hashing for FormHub accounts.
//!
//! Stored hashes are PHC strings (`$argon2id$v=19$...`) so the parameters
//! travel with each record. Plaintext passwords never leave this module.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use formhub_core::error::AppError;

/// Argon2id (v0x13, default cost) over account passwords.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a hasher using the account password parameters.
    pub fn new() -> Self {
        Self
    }

    fn argon2() -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
    }

    /// Hash a new account password into a PHC string for the `users` table.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Self::argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Check a login attempt against a user's stored hash.
    ///
    /// A mismatch is `Ok(false)`. Only an unreadable stored hash is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let stored = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Stored password hash is unreadable: {e}")))?;

        match Self::argon2().verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Spend one Argon2 derivation on a login whose email matched no account,
    /// so it costs the same as a wrong password.
    pub fn verify_without_account(&self, password: &str) {
        let salt = SaltString::generate(&mut OsRng);
        let _ = Self::argon2().hash_password(password.as_bytes(), &salt);
    }
}
