//! Schema migration and startup maintenance settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MigrationConfig {
    /// Rows processed between progress reports during data migrations.
    pub batch_size: usize,
    /// Apply pending migrations when the engine starts.
    pub run_on_startup: bool,
    /// Remove conditions pointing at missing or disabled metrics at startup.
    pub clean_invalid_references_on_startup: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            run_on_startup: true,
            clean_invalid_references_on_startup: false,
        }
    }
}
