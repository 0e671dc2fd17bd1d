//! # formhub-auth
//!
//! Authentication for FormHub.
//!
//! ## Modules
//!
//! - `jwt`: signed session token creation and validation
//! - `session`: the session issuer used by the API layer
//! - `password`: Argon2id hashing and password policy
//! - `credentials`: user registration, login checks, and profile changes

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod session;

pub use credentials::{CredentialStore, ProfileChanges, Registration};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::SessionIssuer;
