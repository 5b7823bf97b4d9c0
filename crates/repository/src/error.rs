use domain::{Entity, PreconditionError, ValidationError};
use thiserror::Error;

/// Errors that can occur when persisting or loading aggregates.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No stored record matches the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A record with this id is already stored.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A stored record could not be turned back into a valid entity.
    #[error("Invalid stored record: {0}")]
    Validation(#[from] ValidationError),

    /// A stored record violates an entity precondition.
    #[error("Invalid stored record: {0}")]
    Precondition(#[from] PreconditionError),

    /// A value cannot be represented in (or read from) its column.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl RepositoryError {
    /// Builds a [`RepositoryError::NotFound`] for entity type `E`.
    pub fn not_found<E: Entity>(id: &E::Id) -> Self {
        Self::NotFound {
            entity: E::entity_type(),
            id: id.to_string(),
        }
    }

    /// Builds a [`RepositoryError::AlreadyExists`] for entity type `E`.
    pub fn already_exists<E: Entity>(id: &E::Id) -> Self {
        Self::AlreadyExists {
            entity: E::entity_type(),
            id: id.to_string(),
        }
    }

    /// Returns true if this error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
