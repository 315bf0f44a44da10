//! Stable error codes shared by every layer.

pub const CONSTRAINT_VIOLATION: &str = "CONSTRAINT_VIOLATION";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const DB_BUSY: &str = "DB_BUSY";
pub const DB_CORRUPT: &str = "DB_CORRUPT";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const INVALID_STATE: &str = "INVALID_STATE";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to one of the codes above.
pub trait QGateErrorCode {
    fn error_code(&self) -> &'static str;
}
