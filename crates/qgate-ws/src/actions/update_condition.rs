//! `update_condition`: change a condition's threshold and/or description.

use std::sync::Arc;

use qgate_core::traits::storage::{IConditionStorage, IMetricStorage, IUserStorage};
use qgate_core::types::{MetricRef, User};
use tracing::debug;

use super::{check_can_edit, load_condition, load_owning_gate, QualityGateStore, WsAction};
use crate::error::{WsError, WsResult};
use crate::json::write_condition;
use crate::request::WsRequest;
use crate::session::UserSession;
use crate::validator::validate_threshold;

pub const PARAM_ID: &str = "id";
pub const PARAM_VALUE: &str = "value";
pub const PARAM_DESCRIPTION: &str = "description";

pub struct UpdateConditionAction {
    store: Arc<dyn QualityGateStore>,
}

impl UpdateConditionAction {
    pub fn new(store: Arc<dyn QualityGateStore>) -> Self {
        Self { store }
    }

    fn current_user(&self, session: &UserSession) -> WsResult<User> {
        let uuid = session
            .uuid()
            .ok_or_else(|| WsError::InvalidState("User uuid should not be null".to_string()))?;
        self.store
            .select_user_by_uuid(uuid)?
            .ok_or_else(|| WsError::InvalidState(format!("User with uuid '{uuid}' does not exist")))
    }
}

impl WsAction for UpdateConditionAction {
    fn key(&self) -> &'static str {
        "update_condition"
    }

    fn handle(&self, request: &WsRequest, session: &UserSession) -> WsResult<serde_json::Value> {
        let id = request.mandatory_param(PARAM_ID)?;
        let value = request.param(PARAM_VALUE);
        let description = request.param(PARAM_DESCRIPTION);
        if value.is_none() && description.is_none() {
            return Err(WsError::BadRequest(
                "Value or description must be provided.".to_string(),
            ));
        }

        let mut condition = load_condition(self.store.as_ref(), id)?;
        let metric = self
            .store
            .select_metric(&condition.metric)?
            .ok_or_else(|| WsError::InvalidState(missing_metric(&condition.metric)))?;
        let gate = load_owning_gate(self.store.as_ref(), &condition)?;
        check_can_edit(session, &gate)?;
        let user = self.current_user(session)?;

        if let Some(value) = value {
            condition.error_threshold = validate_threshold(value, metric.value_type)?;
        }
        if let Some(description) = description {
            condition.description = Some(description.to_string());
        }
        condition.updated_by = Some(user.uuid.clone());

        let stored = self.store.update(&condition)?;
        debug!(id, gate = gate.id, "condition updated");
        Ok(write_condition(&stored, Some(&metric), &gate, Some(&user)))
    }
}

fn missing_metric(metric: &MetricRef) -> String {
    match metric {
        MetricRef::Uuid(uuid) => format!("Metric with uuid '{uuid}' does not exist"),
        MetricRef::Legacy(id) => format!("Metric with id '{id}' does not exist"),
    }
}
