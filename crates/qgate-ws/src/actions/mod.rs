//! Condition actions. Each one is a small handler behind [`WsAction`].

pub mod delete_condition;
pub mod list_conditions;
pub mod update_condition;

use qgate_core::traits::storage::{
    IConditionStorage, IMetricStorage, IQualityGateStorage, IUserStorage,
};
use qgate_core::types::{Condition, QualityGate};

use crate::error::{WsError, WsResult};
use crate::request::WsRequest;
use crate::session::UserSession;

pub use delete_condition::DeleteConditionAction;
pub use list_conditions::ListConditionsAction;
pub use update_condition::UpdateConditionAction;

/// Everything the actions read and write.
pub trait QualityGateStore:
    IConditionStorage + IMetricStorage + IQualityGateStorage + IUserStorage
{
}

impl<T> QualityGateStore for T where
    T: IConditionStorage + IMetricStorage + IQualityGateStorage + IUserStorage + ?Sized
{
}

pub trait WsAction: Send + Sync {
    /// Name the controller dispatches on.
    fn key(&self) -> &'static str;

    fn handle(&self, request: &WsRequest, session: &UserSession) -> WsResult<serde_json::Value>;
}

pub(crate) fn load_condition(store: &dyn QualityGateStore, id: &str) -> WsResult<Condition> {
    store
        .select_by_uuid(id)?
        .ok_or_else(|| WsError::NotFound(format!("Condition with id '{id}' does not exist")))
}

/// The gate owning an existing condition. Its absence means the row is orphaned.
pub(crate) fn load_owning_gate(
    store: &dyn QualityGateStore,
    condition: &Condition,
) -> WsResult<QualityGate> {
    store
        .select_quality_gate_by_id(condition.quality_gate_id)?
        .ok_or_else(|| {
            WsError::InvalidState(format!(
                "Quality gate with id '{}' does not exist",
                condition.quality_gate_id
            ))
        })
}

/// Caller may administer gates and the gate is not built in.
pub(crate) fn check_can_edit(session: &UserSession, gate: &QualityGate) -> WsResult<()> {
    session.check_can_administer_quality_gates()?;
    if gate.built_in {
        return Err(WsError::BadRequest(format!(
            "Operation forbidden for built-in Quality Gate '{}'",
            gate.name
        )));
    }
    Ok(())
}
