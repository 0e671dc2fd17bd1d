//! Form (typebot) registry and folder membership coordination.

pub mod fields;
pub mod service;

pub use fields::sanitize_fields;
pub use service::FormService;
