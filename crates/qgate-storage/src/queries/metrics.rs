//! metrics table queries.

use qgate_core::errors::StorageError;
use qgate_core::types::{Metric, MetricType};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::to_storage_err;

/// Insert a metric and return its assigned numeric id.
pub fn insert_metric(
    conn: &Connection,
    uuid: &str,
    key: &str,
    value_type: MetricType,
    enabled: bool,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO metrics (uuid, metric_key, value_type, enabled) VALUES (?1, ?2, ?3, ?4)",
        params![uuid, key, value_type.as_str(), enabled],
    )
    .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_metric_by_uuid(conn: &Connection, uuid: &str) -> Result<Option<Metric>, StorageError> {
    conn.prepare_cached(
        "SELECT id, uuid, metric_key, value_type, enabled FROM metrics WHERE uuid = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![uuid], row_to_metric).optional())
    .map_err(to_storage_err)
}

pub fn get_metric_by_id(conn: &Connection, id: i64) -> Result<Option<Metric>, StorageError> {
    conn.prepare_cached(
        "SELECT id, uuid, metric_key, value_type, enabled FROM metrics WHERE id = ?1",
    )
    .and_then(|mut stmt| stmt.query_row(params![id], row_to_metric).optional())
    .map_err(to_storage_err)
}

/// Returns rows affected.
pub fn set_enabled(conn: &Connection, uuid: &str, enabled: bool) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE metrics SET enabled = ?2 WHERE uuid = ?1",
        params![uuid, enabled],
    )
    .map_err(to_storage_err)
}

fn row_to_metric(row: &Row<'_>) -> rusqlite::Result<Metric> {
    let raw_type: String = row.get(3)?;
    let value_type = raw_type
        .parse::<MetricType>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?;
    Ok(Metric {
        id: row.get(0)?,
        uuid: row.get(1)?,
        key: row.get(2)?,
        value_type,
        enabled: row.get(4)?,
    })
}
