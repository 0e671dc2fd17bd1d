//! Response collector.

pub mod service;

pub use service::{RECENT_RESPONSES_LIMIT, ResponseService, answers_from_json};
