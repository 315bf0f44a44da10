//! Error types for the quality-gate condition store.
//! Every subsystem error implements [`QGateErrorCode`] so callers can map
//! failures to stable machine-readable codes.

pub mod config_error;
pub mod error_code;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::QGateErrorCode;
pub use storage_error::StorageError;

/// Convenience alias for storage results.
pub type StorageResult<T> = Result<T, StorageError>;
