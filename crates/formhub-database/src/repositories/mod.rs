//! PostgreSQL implementations of the store traits.

pub mod folder;
pub mod form;
pub mod response;
pub mod user;

pub use folder::FolderRepository;
pub use form::FormRepository;
pub use response::ResponseRepository;
pub use user::UserRepository;

/// Name of the constraint a database error was raised by, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}
