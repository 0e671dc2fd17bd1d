//! Form response domain entities.

pub mod model;

pub use model::{FormResponse, FormStats};
