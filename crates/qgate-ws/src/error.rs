//! Handler errors and their HTTP mapping.

use qgate_core::errors::error_code::{self, QGateErrorCode};
use qgate_core::errors::StorageError;
use serde_json::json;

pub type WsResult<T> = Result<T, WsError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WsError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The stored data is inconsistent with the request (dangling metric,
    /// gate or user).
    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Authentication is required")]
    Unauthorized,

    #[error(transparent)]
    Storage(StorageError),
}

impl WsError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::InvalidState(_) => 409,
            Self::Storage(_) => 500,
        }
    }

    /// Error body in the `{"errors":[{"msg": ...}]}` shape.
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "errors": [{ "msg": self.to_string() }] })
    }
}

/// Missing rows and rejected fields surface as client errors; everything
/// else stays a storage failure.
impl From<StorageError> for WsError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { .. } => Self::NotFound(e.to_string()),
            StorageError::ConstraintViolation { .. } => Self::BadRequest(e.to_string()),
            other => Self::Storage(other),
        }
    }
}

impl QGateErrorCode for WsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => error_code::BAD_REQUEST,
            Self::NotFound(_) => error_code::NOT_FOUND,
            Self::InvalidState(_) => error_code::INVALID_STATE,
            Self::Forbidden(_) => error_code::FORBIDDEN,
            Self::Unauthorized => error_code::UNAUTHORIZED,
            Self::Storage(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_not_found_becomes_404() {
        let err = WsError::from(StorageError::NotFound {
            entity: "Condition",
            id: "abc".to_string(),
        });
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn constraint_violation_becomes_bad_request() {
        let err = WsError::from(StorageError::ConstraintViolation { field: "operator" });
        assert!(matches!(err, WsError::BadRequest(_)));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn busy_database_stays_a_server_error() {
        let err = WsError::from(StorageError::DbBusy);
        assert_eq!(err.http_status(), 500);
        assert_eq!(err.error_code(), "DB_BUSY");
    }

    #[test]
    fn body_carries_the_message() {
        let err = WsError::BadRequest("Value or description must be provided.".to_string());
        assert_eq!(
            err.to_json(),
            json!({ "errors": [{ "msg": "Value or description must be provided." }] })
        );
    }
}
