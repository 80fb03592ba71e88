use crate::repository::RepositoryError;

pub use errors::{ServiceError, ServiceResult};

pub mod articles;
pub mod errors;
pub mod videos;

/// Translate a repository failure, logging the ones the caller cannot fix.
pub(crate) fn repository_failure(action: &str, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound,
        RepositoryError::ValidationError(message) => ServiceError::Validation(message),
        RepositoryError::AssociationOwnerMismatch(mismatch) => {
            ServiceError::AssociationOwnerMismatch(mismatch.to_string())
        }
        err @ (RepositoryError::ConnectionError(_)
        | RepositoryError::DatabaseError(_)
        | RepositoryError::CorruptData(_)) => {
            log::error!("Failed to {action}: {err}");
            ServiceError::Internal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    #[test]
    fn corrupt_rows_are_internal_errors() {
        let err = RepositoryError::from(TypeConstraintError::NonPositiveId("tag_id"));
        assert_eq!(
            repository_failure("list articles", err),
            ServiceError::Internal
        );
    }

    #[test]
    fn unknown_embedded_rows_stay_client_errors() {
        let err = RepositoryError::ValidationError("tag 9 does not exist".to_string());
        assert_eq!(
            repository_failure("update article", err),
            ServiceError::Validation("tag 9 does not exist".to_string())
        );
    }
}
