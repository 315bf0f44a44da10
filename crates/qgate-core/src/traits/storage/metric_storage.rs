//! `IMetricStorage` trait: metrics referenced by conditions.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::{Metric, MetricRef, NewMetric};

pub trait IMetricStorage: Send + Sync {
    /// Persist a metric, assigning both its numeric id and its uuid.
    fn insert_metric(&self, metric: NewMetric) -> Result<Metric, StorageError>;

    fn select_metric_by_uuid(&self, uuid: &str) -> Result<Option<Metric>, StorageError>;

    fn select_metric_by_id(&self, id: i64) -> Result<Option<Metric>, StorageError>;

    /// Enable or disable a metric. Returns whether the metric exists.
    fn set_metric_enabled(&self, uuid: &str, enabled: bool) -> Result<bool, StorageError>;

    /// Resolve a condition's metric reference, whichever form it takes.
    fn select_metric(&self, metric: &MetricRef) -> Result<Option<Metric>, StorageError> {
        match metric {
            MetricRef::Uuid(uuid) => self.select_metric_by_uuid(uuid),
            MetricRef::Legacy(id) => self.select_metric_by_id(*id),
        }
    }
}

impl<T: IMetricStorage + ?Sized> IMetricStorage for Arc<T> {
    fn insert_metric(&self, metric: NewMetric) -> Result<Metric, StorageError> {
        (**self).insert_metric(metric)
    }
    fn select_metric_by_uuid(&self, uuid: &str) -> Result<Option<Metric>, StorageError> {
        (**self).select_metric_by_uuid(uuid)
    }
    fn select_metric_by_id(&self, id: i64) -> Result<Option<Metric>, StorageError> {
        (**self).select_metric_by_id(id)
    }
    fn set_metric_enabled(&self, uuid: &str, enabled: bool) -> Result<bool, StorageError> {
        (**self).set_metric_enabled(uuid, enabled)
    }
}
