//! Tracing bootstrap for binaries and test harnesses embedding the store.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::ConfigError;

/// Build the filter: `RUST_LOG` wins, the configured directive is the fallback.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            ConfigError::Invalid(format!("logging.filter '{}': {e}", config.filter))
        }),
    }
}

/// Install the global fmt subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed,
/// so calling this twice (or from a host that set up its own) is harmless.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, ConfigError> {
    let filter = build_filter(config)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .is_ok();
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_not_an_error() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config).unwrap();
        assert!(!init_tracing(&config).unwrap());
    }

    #[test]
    fn bad_directive_is_rejected_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            filter: "qgate=notalevel".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(build_filter(&config), Err(ConfigError::Invalid(_))));
    }
}
