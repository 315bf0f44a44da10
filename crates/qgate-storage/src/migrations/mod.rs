//! Migration runner: version tracking, forward-only, transactional per migration.

mod v001_initial_schema;
mod v002_conditions_metric_uuid;
pub mod v003_populate_conditions_metric_uuid;

use qgate_core::errors::StorageError;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::to_storage_err;

pub use v003_populate_conditions_metric_uuid::{populate, PopulateStats};

/// Highest known schema version.
pub const LATEST_VERSION: u32 = 3;

/// Rows between progress reports when no batch size is configured.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// A migration receives the connection and the data-change batch size.
type MigrationFn = fn(&Connection, usize) -> Result<(), StorageError>;

const MIGRATIONS: [(u32, &str, MigrationFn); 3] = [
    (1, "initial_schema", v001_initial_schema::migrate),
    (2, "conditions_metric_uuid", v002_conditions_metric_uuid::migrate),
    (
        3,
        "populate_conditions_metric_uuid",
        v003_populate_conditions_metric_uuid::migrate,
    ),
];

/// Get the current schema version from the database.
/// Returns 0 if the schema_version table doesn't exist yet.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    let exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(to_storage_err)?;

    if !exists {
        return Ok(0);
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(to_storage_err)
}

/// Run all pending migrations with the default batch size.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    run_migrations_to(conn, LATEST_VERSION, DEFAULT_BATCH_SIZE)
}

/// Run pending migrations up to and including `target`.
/// Each migration runs in its own transaction; returns how many were applied.
pub fn run_migrations_to(
    conn: &Connection,
    target: u32,
    batch_size: usize,
) -> Result<u32, StorageError> {
    let current = current_version(conn)?;
    let target = target.min(LATEST_VERSION);

    if current >= target {
        debug!("database schema is up to date (v{current})");
        return Ok(0);
    }

    info!("running migrations: v{current} → v{target}");

    let mut applied = 0;
    for &(version, name, migrate_fn) in &MIGRATIONS {
        if version <= current || version > target {
            continue;
        }

        debug!("applying migration v{version:03}: {name}");

        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| StorageError::MigrationFailed {
                version,
                message: format!("begin transaction: {e}"),
            })?;

        let outcome = migrate_fn(conn, batch_size.max(1)).and_then(|()| {
            conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
                .map(|_| ())
                .map_err(to_storage_err)
        });

        match outcome {
            Ok(()) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| StorageError::MigrationFailed {
                        version,
                        message: format!("commit: {e}"),
                    })?;
                info!("applied migration v{version:03}: {name}");
                applied += 1;
            }
            Err(e) => {
                warn!("migration v{version:03} failed: {e}, rolling back");
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StorageError::MigrationFailed {
                    version,
                    message: e.to_string(),
                });
            }
        }
    }

    info!("applied {applied} migration(s), now at v{target}");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn fresh_database_is_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
    }

    #[test]
    fn full_run_reaches_latest() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&conn).unwrap(), LATEST_VERSION);
        assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);

        let cols = columns(&conn, "quality_gate_conditions");
        for expected in [
            "uuid",
            "quality_gate_id",
            "metric_id",
            "metric_uuid",
            "operator",
            "error_threshold",
            "created_at",
        ] {
            assert!(cols.iter().any(|c| c == expected), "missing column {expected}");
        }
        let cols = columns(&conn, "metrics");
        for expected in ["id", "uuid", "enabled"] {
            assert!(cols.iter().any(|c| c == expected), "missing column {expected}");
        }
    }

    #[test]
    fn second_run_applies_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(run_migrations(&conn).unwrap(), 0);
        assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    }

    #[test]
    fn partial_run_stops_at_target() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations_to(&conn, 1, DEFAULT_BATCH_SIZE).unwrap(), 1);
        assert!(!columns(&conn, "quality_gate_conditions")
            .iter()
            .any(|c| c == "metric_uuid"));

        assert_eq!(run_migrations(&conn).unwrap(), 2);
        assert!(columns(&conn, "quality_gate_conditions")
            .iter()
            .any(|c| c == "metric_uuid"));
    }

    #[test]
    fn failed_migration_rolls_back_and_reports_version() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations_to(&conn, 1, DEFAULT_BATCH_SIZE).unwrap();
        // Pre-create the column v002 adds so its ALTER TABLE fails.
        conn.execute_batch("ALTER TABLE quality_gate_conditions ADD COLUMN metric_uuid TEXT")
            .unwrap();

        let err = run_migrations(&conn).unwrap_err();
        assert!(matches!(err, StorageError::MigrationFailed { version: 2, .. }));
        assert_eq!(current_version(&conn).unwrap(), 1);
        assert!(conn.is_autocommit(), "transaction left open after rollback");
    }
}
