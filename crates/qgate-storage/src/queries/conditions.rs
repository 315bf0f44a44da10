//! quality_gate_conditions table queries.

use qgate_core::errors::StorageError;
use qgate_core::types::{Condition, MetricRef};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::to_storage_err;

const COLUMNS: &str = "uuid, quality_gate_id, metric_uuid, metric_id, operator, error_threshold,
                       description, updated_by, created_at, updated_at";

/// Insert a fully populated condition row.
pub fn insert_condition(conn: &Connection, c: &Condition) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO quality_gate_conditions
         (uuid, quality_gate_id, metric_uuid, metric_id, operator, error_threshold,
          description, updated_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            c.uuid,
            c.quality_gate_id,
            c.metric.uuid(),
            c.metric.legacy_id(),
            c.operator,
            c.error_threshold,
            c.description,
            c.updated_by,
            c.created_at,
            c.updated_at,
        ])
    })
    .map_err(to_storage_err)?;
    Ok(())
}

/// Get a condition by uuid.
pub fn get_condition(conn: &Connection, uuid: &str) -> Result<Option<Condition>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM quality_gate_conditions WHERE uuid = ?1"
    ))
    .and_then(|mut stmt| stmt.query_row(params![uuid], row_to_condition).optional())
    .map_err(to_storage_err)
}

/// All conditions of a gate, oldest first; insertion order breaks ties.
pub fn list_for_gate(
    conn: &Connection,
    quality_gate_id: i64,
) -> Result<Vec<Condition>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM quality_gate_conditions
             WHERE quality_gate_id = ?1
             ORDER BY created_at ASC, rowid ASC"
        ))
        .map_err(to_storage_err)?;

    let rows = stmt
        .query_map(params![quality_gate_id], row_to_condition)
        .map_err(to_storage_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(to_storage_err)?);
    }
    Ok(result)
}

pub fn count_for_gate(conn: &Connection, quality_gate_id: i64) -> Result<usize, StorageError> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM quality_gate_conditions WHERE quality_gate_id = ?1",
            params![quality_gate_id],
            |row| row.get(0),
        )
        .map_err(to_storage_err)?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Rewrite the mutable columns of a condition. Returns rows affected.
///
/// Switching to a different metric uuid clears the legacy id; keeping the
/// same uuid preserves it. A legacy reference clears the uuid.
pub fn update_condition(
    conn: &Connection,
    c: &Condition,
    updated_at: i64,
) -> Result<usize, StorageError> {
    conn.prepare_cached(
        "UPDATE quality_gate_conditions SET
            metric_id = CASE
                WHEN ?2 IS NULL THEN ?3
                WHEN metric_uuid IS ?2 THEN metric_id
                ELSE NULL
            END,
            metric_uuid = ?2,
            operator = ?4,
            error_threshold = ?5,
            description = ?6,
            updated_by = ?7,
            updated_at = ?8
         WHERE uuid = ?1",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            c.uuid,
            c.metric.uuid(),
            c.metric.legacy_id(),
            c.operator,
            c.error_threshold,
            c.description,
            c.updated_by,
            updated_at,
        ])
    })
    .map_err(to_storage_err)
}

/// Delete by uuid. Returns rows affected (0 when already gone).
pub fn delete_condition(conn: &Connection, uuid: &str) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM quality_gate_conditions WHERE uuid = ?1",
        params![uuid],
    )
    .map_err(to_storage_err)
}

/// Delete every condition whose metric is absent or disabled.
/// The stable reference is authoritative when present; rows that only carry
/// a legacy id are checked against `metrics.id`.
pub fn delete_with_invalid_metrics(conn: &Connection) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM quality_gate_conditions
         WHERE NOT EXISTS (
             SELECT 1 FROM metrics m
             WHERE m.enabled = 1
               AND (
                   (quality_gate_conditions.metric_uuid IS NOT NULL
                        AND m.uuid = quality_gate_conditions.metric_uuid)
                   OR (quality_gate_conditions.metric_uuid IS NULL
                        AND m.id = quality_gate_conditions.metric_id)
               )
         )",
        [],
    )
    .map_err(to_storage_err)
}

fn row_to_condition(row: &Row<'_>) -> rusqlite::Result<Condition> {
    let metric_uuid: Option<String> = row.get(2)?;
    let metric_id: Option<i64> = row.get(3)?;
    let metric = match (metric_uuid, metric_id) {
        (Some(uuid), _) => MetricRef::Uuid(uuid),
        (None, Some(id)) => MetricRef::Legacy(id),
        (None, None) => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                2,
                Type::Null,
                "condition has neither metric_uuid nor metric_id".into(),
            ))
        }
    };
    Ok(Condition {
        uuid: row.get(0)?,
        quality_gate_id: row.get(1)?,
        metric,
        operator: row.get(4)?,
        error_threshold: row.get(5)?,
        description: row.get(6)?,
        updated_by: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
