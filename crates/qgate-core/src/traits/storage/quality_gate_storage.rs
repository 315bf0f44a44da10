//! `IQualityGateStorage` trait: the owners of conditions.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::QualityGate;

pub trait IQualityGateStorage: Send + Sync {
    fn insert_quality_gate(&self, name: &str, built_in: bool)
        -> Result<QualityGate, StorageError>;

    fn select_quality_gate_by_id(&self, id: i64) -> Result<Option<QualityGate>, StorageError>;
}

impl<T: IQualityGateStorage + ?Sized> IQualityGateStorage for Arc<T> {
    fn insert_quality_gate(
        &self,
        name: &str,
        built_in: bool,
    ) -> Result<QualityGate, StorageError> {
        (**self).insert_quality_gate(name, built_in)
    }
    fn select_quality_gate_by_id(&self, id: i64) -> Result<Option<QualityGate>, StorageError> {
        (**self).select_quality_gate_by_id(id)
    }
}
