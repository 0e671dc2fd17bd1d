//! # formhub-entity
//!
//! Domain entity models for FormHub. Every struct in this crate represents
//! a database row or a value object derived from one. Database entities
//! derive `sqlx::FromRow`.

pub mod folder;
pub mod form;
pub mod response;
pub mod user;
