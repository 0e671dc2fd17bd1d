//! User identity and password verification.

pub mod store;

pub use store::{CredentialStore, ProfileChanges, Registration};
