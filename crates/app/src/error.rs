//! Application-level error type.

use domain::{DomainError, PreconditionError, ValidationError};
use repository::RepositoryError;
use thiserror::Error;

/// Anything that can stop the sales walk-through.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<PreconditionError> for AppError {
    fn from(err: PreconditionError) -> Self {
        Self::Domain(err.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_message() {
        let err: AppError = PreconditionError::AddressMandatory.into();
        assert_eq!(
            err.to_string(),
            "Precondition failed: Address is mandatory to activate a customer"
        );

        let err: AppError = ValidationError::ItemsRequired.into();
        assert!(matches!(err, AppError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn repository_errors_keep_their_message() {
        let err: AppError = RepositoryError::NotFound {
            entity: "Order",
            id: "568AS".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Order not found: 568AS");
    }
}
