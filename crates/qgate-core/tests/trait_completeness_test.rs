//! Storage trait design checks: object safety, Arc blanket impls and
//! default metric resolution.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use qgate_core::errors::StorageError;
use qgate_core::traits::{IConditionStorage, IMetricStorage, IQualityGateStorage, IUserStorage};
use qgate_core::types::{Metric, MetricRef, MetricType, NewMetric};

#[test]
fn condition_storage_is_object_safe() {
    fn _assert_object_safe(_: &dyn IConditionStorage) {}
}

#[test]
fn metric_storage_is_object_safe() {
    fn _assert_object_safe(_: &dyn IMetricStorage) {}
}

#[test]
fn quality_gate_storage_is_object_safe() {
    fn _assert_object_safe(_: &dyn IQualityGateStorage) {}
}

#[test]
fn user_storage_is_object_safe() {
    fn _assert_object_safe(_: &dyn IUserStorage) {}
}

#[test]
fn arc_of_trait_object_implements_trait() {
    fn _assert_conditions<T: IConditionStorage>() {}
    fn _assert_metrics<T: IMetricStorage>() {}
    _assert_conditions::<Arc<dyn IConditionStorage>>();
    _assert_metrics::<Arc<dyn IMetricStorage>>();
}

// ─── Metric resolution through the default method ───────────────────

#[derive(Default)]
struct MetricsStub {
    rows: Mutex<HashMap<i64, Metric>>,
}

impl IMetricStorage for MetricsStub {
    fn insert_metric(&self, metric: NewMetric) -> Result<Metric, StorageError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        let row = Metric {
            id,
            uuid: format!("m-{id}"),
            key: metric.key,
            value_type: metric.value_type,
            enabled: metric.enabled,
        };
        rows.insert(id, row.clone());
        Ok(row)
    }
    fn select_metric_by_uuid(&self, uuid: &str) -> Result<Option<Metric>, StorageError> {
        Ok(self.rows.lock().unwrap().values().find(|m| m.uuid == uuid).cloned())
    }
    fn select_metric_by_id(&self, id: i64) -> Result<Option<Metric>, StorageError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
    fn set_metric_enabled(&self, _: &str, _: bool) -> Result<bool, StorageError> {
        Ok(false)
    }
}

#[test]
fn select_metric_follows_either_reference_form() {
    let stub = Arc::new(MetricsStub::default());
    let coverage = stub
        .insert_metric(NewMetric::new("coverage", MetricType::Percent))
        .unwrap();

    let by_uuid = stub.select_metric(&MetricRef::Uuid(coverage.uuid.clone())).unwrap();
    let by_legacy = stub.select_metric(&MetricRef::Legacy(coverage.id)).unwrap();
    assert_eq!(by_uuid.as_ref(), Some(&coverage));
    assert_eq!(by_legacy.as_ref(), Some(&coverage));

    assert!(stub.select_metric(&MetricRef::Legacy(299)).unwrap().is_none());
}
