//! Configuration for the condition store, loaded from TOML.

pub mod logging_config;
pub mod migration_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use logging_config::LoggingConfig;
pub use migration_config::MigrationConfig;
pub use storage_config::StorageConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct QGateConfig {
    pub storage: StorageConfig,
    pub migration: MigrationConfig,
    pub logging: LoggingConfig,
}

impl QGateConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        ::tracing::debug!(path = %path.display(), "loading configuration");
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Reject values the store cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.read_pool_size == 0 {
            return Err(ConfigError::Invalid(
                "storage.read_pool_size must be greater than zero".to_string(),
            ));
        }
        if self.migration.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "migration.batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
