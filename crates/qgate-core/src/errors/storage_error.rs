//! Storage-layer errors for SQLite operations.

use super::error_code::{self, QGateErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Constraint violation: required field '{field}' is missing")]
    ConstraintViolation { field: &'static str },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Database corrupt: {details}")]
    DbCorrupt { details: String },
}

impl StorageError {
    /// Wrap any displayable SQLite failure.
    pub fn sqlite(e: impl std::fmt::Display) -> Self {
        Self::SqliteError {
            message: e.to_string(),
        }
    }
}

impl QGateErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::ConstraintViolation { .. } => error_code::CONSTRAINT_VIOLATION,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::DbBusy => error_code::DB_BUSY,
            Self::DbCorrupt { .. } => error_code::DB_CORRUPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            StorageError::ConstraintViolation { field: "operator" }.error_code(),
            "CONSTRAINT_VIOLATION"
        );
        assert_eq!(
            StorageError::NotFound {
                entity: "Condition",
                id: "x".to_string()
            }
            .error_code(),
            "NOT_FOUND"
        );
        assert_eq!(StorageError::DbBusy.error_code(), "DB_BUSY");
        assert_eq!(StorageError::sqlite("boom").error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn messages_name_the_offender() {
        let err = StorageError::ConstraintViolation {
            field: "error_threshold",
        };
        assert!(err.to_string().contains("error_threshold"));

        let err = StorageError::NotFound {
            entity: "Condition",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Condition not found: abc");
    }
}
