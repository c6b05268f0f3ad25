//! Database error types for leaf-db.

use leaf_core::enums::EntityType;
use leaf_core::errors::ValidationErrors;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A stored value could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// No row with the given id.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityType, id: i64 },

    /// The write was rejected; holds every offending field.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Field errors, if this is a validation failure.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
