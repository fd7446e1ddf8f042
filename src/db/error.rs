//! Tagged store errors
//!
//! The repository layer returns [`StoreError`] instead of raw driver errors.
//! Constraint violations and missing rows are recognized here, once, so the
//! API layer maps error kinds to statuses without touching sqlx types.

/// Error kind returned by every repository operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("row not found")]
    NotFound,

    /// A foreign key constraint rejected the statement: the referenced
    /// topic, user, or article row is missing.
    #[error("foreign key constraint violated")]
    ForeignKey,

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

/// Result alias used throughout the repository layer.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
            {
                StoreError::ForeignKey
            }
            _ => StoreError::Database(e),
        }
    }
}

impl StoreError {
    /// True when the error is a missing-row condition rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
