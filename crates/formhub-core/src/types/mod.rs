//! Core type definitions used across the FormHub workspace.

pub mod id;

pub use id::*;
