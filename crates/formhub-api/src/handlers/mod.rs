//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod folder;
pub mod form;
pub mod health;
pub mod response;
pub mod user;
