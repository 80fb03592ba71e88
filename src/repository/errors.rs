use diesel::r2d2::PoolError;
use thiserror::Error;

use crate::domain::association::AssociationOwnerMismatch;
use crate::domain::types::TypeConstraintError;

/// Errors returned by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No connection could be taken from the pool.
    #[error("connection pool error: {0}")]
    ConnectionError(#[from] PoolError),
    /// The database rejected a query.
    #[error("database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    /// The entity addressed by the operation does not exist.
    #[error("entity not found")]
    NotFound,
    /// Data supplied by the caller cannot be applied.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// A stored row no longer satisfies a domain constraint.
    #[error("corrupt stored data: {0}")]
    CorruptData(String),
    /// An association row is owned by a different entity.
    #[error(transparent)]
    AssociationOwnerMismatch(#[from] AssociationOwnerMismatch),
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::CorruptData(val.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
