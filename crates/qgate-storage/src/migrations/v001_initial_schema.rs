//! v001: metrics, quality gates, users and conditions in their legacy shape
//! (conditions reference metrics by numeric id).

use qgate_core::errors::StorageError;
use rusqlite::Connection;

use crate::to_storage_err;

pub fn migrate(conn: &Connection, _batch_size: usize) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS metrics (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid       TEXT NOT NULL UNIQUE,
            metric_key TEXT NOT NULL UNIQUE,
            value_type TEXT NOT NULL,
            enabled    INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS quality_gates (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid       TEXT NOT NULL UNIQUE,
            name       TEXT NOT NULL UNIQUE,
            built_in   INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            uuid   TEXT PRIMARY KEY,
            login  TEXT NOT NULL UNIQUE,
            name   TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS quality_gate_conditions (
            uuid            TEXT PRIMARY KEY,
            quality_gate_id INTEGER NOT NULL,
            metric_id       INTEGER,
            operator        TEXT NOT NULL,
            error_threshold TEXT NOT NULL,
            description     TEXT,
            updated_by      TEXT,
            created_at      INTEGER NOT NULL,
            updated_at      INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_qgc_gate_created
            ON quality_gate_conditions(quality_gate_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_qgc_metric_id
            ON quality_gate_conditions(metric_id);
        ",
    )
    .map_err(to_storage_err)
}
