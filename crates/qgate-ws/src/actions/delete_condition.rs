//! `delete_condition`: remove one condition from its gate.

use std::sync::Arc;

use qgate_core::traits::storage::IConditionStorage;
use serde_json::json;
use tracing::debug;

use super::{check_can_edit, load_condition, load_owning_gate, QualityGateStore, WsAction};
use crate::error::WsResult;
use crate::request::WsRequest;
use crate::session::UserSession;

pub struct DeleteConditionAction {
    store: Arc<dyn QualityGateStore>,
}

impl DeleteConditionAction {
    pub fn new(store: Arc<dyn QualityGateStore>) -> Self {
        Self { store }
    }
}

impl WsAction for DeleteConditionAction {
    fn key(&self) -> &'static str {
        "delete_condition"
    }

    fn handle(&self, request: &WsRequest, session: &UserSession) -> WsResult<serde_json::Value> {
        let id = request.mandatory_param("id")?;
        let condition = load_condition(self.store.as_ref(), id)?;
        let gate = load_owning_gate(self.store.as_ref(), &condition)?;
        check_can_edit(session, &gate)?;

        let removed = self.store.delete(id)?;
        debug!(id, removed, "condition deleted");
        Ok(json!({ "deleted": id }))
    }
}
