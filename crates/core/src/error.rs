/// Underlying cause of a data-access failure, re-exported so callers need not depend on sqlx.
pub use sqlx::Error as DataAccessCause;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("data access failure: {0}")]
    DataAccess(#[from] DataAccessCause),
    #[error("invalid input: {0}")]
    Validation(String),
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;
