//! Request parameters.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::WsError;

/// Flat string parameters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct WsRequest {
    params: HashMap<String, String>,
}

impl WsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Optional parameter, as sent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Required parameter; missing or blank is a bad request.
    pub fn mandatory_param(&self, name: &str) -> Result<&str, WsError> {
        self.param(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| WsError::BadRequest(format!("The '{name}' parameter is missing")))
    }
}

impl From<HashMap<String, String>> for WsRequest {
    fn from(params: HashMap<String, String>) -> Self {
        Self { params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_mandatory_param_is_missing() {
        let req = WsRequest::new().with_param("id", "  ");
        assert_eq!(
            req.mandatory_param("id").unwrap_err(),
            WsError::BadRequest("The 'id' parameter is missing".to_string())
        );
        assert_eq!(req.param("id"), Some("  "));
    }

    #[test]
    fn deserializes_from_a_json_object() {
        let req: WsRequest =
            serde_json::from_str(r#"{"id":"AU-Tpxb","value":"12"}"#).unwrap();
        assert_eq!(req.mandatory_param("id").unwrap(), "AU-Tpxb");
        assert_eq!(req.param("value"), Some("12"));
        assert_eq!(req.param("description"), None);
    }
}
