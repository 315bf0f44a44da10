//! quality_gates table queries.

use qgate_core::errors::StorageError;
use qgate_core::types::QualityGate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::to_storage_err;

pub fn insert_quality_gate(
    conn: &Connection,
    uuid: &str,
    name: &str,
    built_in: bool,
    created_at: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO quality_gates (uuid, name, built_in, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![uuid, name, built_in, created_at],
    )
    .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_quality_gate(conn: &Connection, id: i64) -> Result<Option<QualityGate>, StorageError> {
    conn.prepare_cached(
        "SELECT id, uuid, name, built_in, created_at FROM quality_gates WHERE id = ?1",
    )
    .and_then(|mut stmt| {
        stmt.query_row(params![id], |row| {
            Ok(QualityGate {
                id: row.get(0)?,
                uuid: row.get(1)?,
                name: row.get(2)?,
                built_in: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()
    })
    .map_err(to_storage_err)
}
