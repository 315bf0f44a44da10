//! Shared fixture: an in-memory engine seeded with one editable gate, one
//! built-in gate, a couple of metrics and an administrator.

#![allow(dead_code)]

use std::sync::Arc;

use qgate_core::traits::storage::{
    IConditionStorage, IMetricStorage, IQualityGateStorage, IUserStorage,
};
use qgate_core::types::{Condition, Metric, MetricType, NewCondition, NewMetric, NewUser, QualityGate, User};
use qgate_core::ManualClock;
use qgate_storage::QGateStorageEngine;
use qgate_ws::{GlobalPermission, UserSession, WsController};

pub struct Fixture {
    pub engine: Arc<QGateStorageEngine>,
    pub controller: WsController,
    pub gate: QualityGate,
    pub built_in_gate: QualityGate,
    pub bugs: Metric,
    pub coverage: Metric,
    pub admin: User,
}

impl Fixture {
    pub fn new() -> Self {
        let engine = Arc::new(
            QGateStorageEngine::open_in_memory()
                .unwrap()
                .with_clock(Arc::new(ManualClock::new(1_700_000_000_000, 1_000))),
        );
        let gate = engine.insert_quality_gate("Team gate", false).unwrap();
        let built_in_gate = engine.insert_quality_gate("Sonar way", true).unwrap();
        let bugs = engine
            .insert_metric(NewMetric::new("bugs", MetricType::Int))
            .unwrap();
        let coverage = engine
            .insert_metric(NewMetric::new("coverage", MetricType::Percent))
            .unwrap();
        let admin = engine.insert_user(NewUser::new("admin", "Administrator")).unwrap();
        let controller = WsController::with_condition_actions(engine.clone());
        Self {
            engine,
            controller,
            gate,
            built_in_gate,
            bugs,
            coverage,
            admin,
        }
    }

    pub fn condition_on(&self, gate: &QualityGate, metric: &Metric, threshold: &str) -> Condition {
        self.engine
            .insert(
                NewCondition::new()
                    .quality_gate_id(gate.id)
                    .metric_uuid(metric.uuid.clone())
                    .operator("GT")
                    .error_threshold(threshold),
            )
            .unwrap()
    }

    pub fn admin_session(&self) -> UserSession {
        UserSession::for_user(&self.admin).with_permission(GlobalPermission::AdministerQualityGates)
    }
}
