//! # qgate-storage
//!
//! SQLite persistence layer for quality-gate conditions.
//! Write-serialized + read-pooled connections, forward-only schema
//! migrations (including the legacy metric reference migration),
//! per-table queries and the invalid-reference cleaner.

pub mod cleanup;
pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use cleanup::CleanupReport;
pub use connection::DatabaseManager;
pub use engine::QGateStorageEngine;
pub use migrations::PopulateStats;

use qgate_core::errors::StorageError;
use rusqlite::ErrorCode;

/// Map a rusqlite failure onto the storage taxonomy.
pub fn to_storage_err(e: rusqlite::Error) -> StorageError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(err.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
        {
            StorageError::DbBusy
        }
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::DatabaseCorrupt => {
            StorageError::DbCorrupt {
                details: e.to_string(),
            }
        }
        _ => StorageError::sqlite(e),
    }
}
