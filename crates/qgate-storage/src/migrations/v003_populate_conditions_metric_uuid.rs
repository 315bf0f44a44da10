//! v003: backfill `quality_gate_conditions.metric_uuid` from the legacy
//! `metric_id` by joining on `metrics.id`.
//!
//! Conditions with no metric reference at all cannot be recovered and are
//! deleted first. [`populate`] only touches rows whose stable reference is
//! missing or disagrees with the join, so running it again after a
//! successful pass deletes nothing and updates nothing.

use qgate_core::errors::StorageError;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::to_storage_err;

/// Outcome of one data-change pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateStats {
    /// Conditions removed because they had no metric reference.
    pub deleted: usize,
    /// Conditions whose `metric_uuid` was written.
    pub updated: usize,
}

pub fn migrate(conn: &Connection, batch_size: usize) -> Result<(), StorageError> {
    populate(conn, batch_size).map(|_| ())
}

/// Run the data change against `conn`. The caller owns the transaction.
pub fn populate(conn: &Connection, batch_size: usize) -> Result<PopulateStats, StorageError> {
    let batch_size = batch_size.max(1);

    let deleted = conn
        .execute(
            "DELETE FROM quality_gate_conditions
             WHERE metric_id IS NULL AND metric_uuid IS NULL",
            [],
        )
        .map_err(to_storage_err)?;

    let pending = select_pending(conn)?;
    let total = pending.len();

    let mut update = conn
        .prepare_cached("UPDATE quality_gate_conditions SET metric_uuid = ?1 WHERE uuid = ?2")
        .map_err(to_storage_err)?;

    let mut updated = 0;
    for (condition_uuid, metric_uuid) in &pending {
        updated += update
            .execute(params![metric_uuid, condition_uuid])
            .map_err(to_storage_err)?;
        if updated % batch_size == 0 {
            debug!(updated, total, "populating quality_gate_conditions.metric_uuid");
        }
    }

    info!(deleted, updated, "populated quality_gate_conditions.metric_uuid");
    Ok(PopulateStats { deleted, updated })
}

/// `(condition uuid, metric uuid)` pairs still needing a write.
fn select_pending(conn: &Connection) -> Result<Vec<(String, String)>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT qgc.uuid, m.uuid
             FROM quality_gate_conditions qgc
             JOIN metrics m ON qgc.metric_id = m.id
             WHERE qgc.metric_uuid IS NULL OR qgc.metric_uuid <> m.uuid
             ORDER BY qgc.rowid",
        )
        .map_err(to_storage_err)?;

    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(to_storage_err)?;

    let mut pending = Vec::new();
    for row in rows {
        pending.push(row.map_err(to_storage_err)?);
    }
    Ok(pending)
}
