use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The request payload could not be decoded or failed validation.
    #[error("invalid input: {0}")]
    Validation(String),
    /// An embedded tag or comment already belongs to another entity.
    #[error("{0}")]
    AssociationOwnerMismatch(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
