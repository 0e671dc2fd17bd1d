//! Form (typebot) domain entities.

pub mod field;
pub mod model;

pub use field::Field;
pub use model::{CreateForm, Form, PublicForm};
