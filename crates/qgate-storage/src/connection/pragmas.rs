//! Per-connection PRAGMA setup.

use std::time::Duration;

use qgate_core::config::StorageConfig;
use qgate_core::errors::StorageError;
use rusqlite::Connection;

use crate::to_storage_err;

/// Pragmas for the write connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> Result<(), StorageError> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(to_storage_err)?;
    let journal = if config.wal && config.path.is_some() {
        "WAL"
    } else {
        "DELETE"
    };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal};
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(to_storage_err)
}

/// Pragmas for read-only pool connections.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> Result<(), StorageError> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(to_storage_err)?;
    conn.execute_batch("PRAGMA query_only = ON;")
        .map_err(to_storage_err)
}
