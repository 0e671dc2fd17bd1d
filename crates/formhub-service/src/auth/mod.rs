//! Account and session operations.

pub mod service;

pub use service::{AuthService, AuthSession};
