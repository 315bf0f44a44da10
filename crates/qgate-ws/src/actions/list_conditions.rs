//! `list_conditions`: every condition of one gate, oldest first.

use std::collections::HashMap;
use std::sync::Arc;

use qgate_core::traits::storage::{
    IConditionStorage, IMetricStorage, IQualityGateStorage, IUserStorage,
};
use qgate_core::types::{Metric, MetricRef, User};
use serde_json::json;

use super::{QualityGateStore, WsAction};
use crate::error::{WsError, WsResult};
use crate::json::write_condition;
use crate::request::WsRequest;
use crate::session::UserSession;

pub const PARAM_GATE_ID: &str = "gateId";

pub struct ListConditionsAction {
    store: Arc<dyn QualityGateStore>,
}

impl ListConditionsAction {
    pub fn new(store: Arc<dyn QualityGateStore>) -> Self {
        Self { store }
    }
}

impl WsAction for ListConditionsAction {
    fn key(&self) -> &'static str {
        "list_conditions"
    }

    fn handle(&self, request: &WsRequest, session: &UserSession) -> WsResult<serde_json::Value> {
        session.check_logged_in()?;
        let raw = request.mandatory_param(PARAM_GATE_ID)?;
        let gate_id: i64 = raw.trim().parse().map_err(|_| {
            WsError::BadRequest(format!("The '{PARAM_GATE_ID}' parameter must be an integer"))
        })?;
        let gate = self.store.select_quality_gate_by_id(gate_id)?.ok_or_else(|| {
            WsError::NotFound(format!("Quality gate with id '{gate_id}' does not exist"))
        })?;

        let conditions = self.store.select_for_quality_gate(gate_id)?;
        let total = self.store.count_for_quality_gate(gate_id)?;

        // Conditions of one gate share few metrics and authors.
        let mut metrics: HashMap<MetricRef, Option<Metric>> = HashMap::new();
        let mut users: HashMap<String, Option<User>> = HashMap::new();
        let mut rows = Vec::with_capacity(conditions.len());
        for condition in &conditions {
            if !metrics.contains_key(&condition.metric) {
                let metric = self.store.select_metric(&condition.metric)?;
                metrics.insert(condition.metric.clone(), metric);
            }
            if let Some(uuid) = &condition.updated_by {
                if !users.contains_key(uuid) {
                    let user = self.store.select_user_by_uuid(uuid)?;
                    users.insert(uuid.clone(), user);
                }
            }
            let metric = metrics.get(&condition.metric).and_then(Option::as_ref);
            let author = condition
                .updated_by
                .as_ref()
                .and_then(|uuid| users.get(uuid))
                .and_then(Option::as_ref);
            rows.push(write_condition(condition, metric, &gate, author));
        }

        Ok(json!({
            "gate": { "id": gate.id, "name": gate.name, "builtIn": gate.built_in },
            "conditions": rows,
            "total": total,
        }))
    }
}
