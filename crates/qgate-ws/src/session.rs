//! Caller identity and permissions, passed explicitly to every action.

use std::collections::HashSet;

use qgate_core::types::User;
use serde::{Deserialize, Serialize};

use crate::error::WsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalPermission {
    AdministerQualityGates,
    Administer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    login: Option<String>,
    uuid: Option<String>,
    permissions: HashSet<GlobalPermission>,
}

impl UserSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in session with no uuid attached yet.
    pub fn logged_in(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
            ..Self::default()
        }
    }

    pub fn for_user(user: &User) -> Self {
        Self::logged_in(user.login.clone()).with_uuid(user.uuid.clone())
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    pub fn with_permission(mut self, permission: GlobalPermission) -> Self {
        self.permissions.insert(permission);
        self
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.is_some()
    }

    pub fn has_permission(&self, permission: GlobalPermission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn check_logged_in(&self) -> Result<(), WsError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(WsError::Unauthorized)
        }
    }

    /// Quality gate administration is granted by either permission.
    pub fn check_can_administer_quality_gates(&self) -> Result<(), WsError> {
        self.check_logged_in()?;
        if self.has_permission(GlobalPermission::AdministerQualityGates)
            || self.has_permission(GlobalPermission::Administer)
        {
            Ok(())
        } else {
            Err(WsError::Forbidden("Insufficient privileges".to_string()))
        }
    }
}
