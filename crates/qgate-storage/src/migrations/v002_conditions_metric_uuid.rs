//! v002: stable metric reference column on conditions.

use qgate_core::errors::StorageError;
use rusqlite::Connection;

use crate::to_storage_err;

pub fn migrate(conn: &Connection, _batch_size: usize) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        ALTER TABLE quality_gate_conditions ADD COLUMN metric_uuid TEXT;

        CREATE INDEX IF NOT EXISTS idx_qgc_metric_uuid
            ON quality_gate_conditions(metric_uuid);
        ",
    )
    .map_err(to_storage_err)
}
