//! Removal of conditions that point at metrics which no longer exist or are
//! disabled. One pass is one IMMEDIATE transaction: either every invalid row
//! goes or none does.

use qgate_core::errors::StorageError;
use tracing::info;

use crate::connection::DatabaseManager;
use crate::queries;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
}

pub fn clean_invalid_references(db: &DatabaseManager) -> Result<CleanupReport, StorageError> {
    let deleted = db.with_transaction(|tx| queries::conditions::delete_with_invalid_metrics(tx))?;
    info!(deleted, "removed conditions with invalid metric references");
    Ok(CleanupReport { deleted })
}
