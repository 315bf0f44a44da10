//! `IConditionStorage` trait: quality-gate condition CRUD and cleanup.
//!
//! Maps to `qgate-storage/src/queries/conditions.rs`.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::{Condition, NewCondition};

/// Keyed persistence for conditions. Every mutation runs in its own
/// transaction.
pub trait IConditionStorage: Send + Sync {
    /// Persist a new condition, assigning its uuid and timestamps.
    /// Missing required fields yield `ConstraintViolation`.
    fn insert(&self, condition: NewCondition) -> Result<Condition, StorageError>;

    /// Exact lookup; `Ok(None)` when absent.
    fn select_by_uuid(&self, uuid: &str) -> Result<Option<Condition>, StorageError>;

    /// All conditions of a gate, oldest first. Unknown gates yield an empty vec.
    fn select_for_quality_gate(&self, quality_gate_id: i64)
        -> Result<Vec<Condition>, StorageError>;

    fn count_for_quality_gate(&self, quality_gate_id: i64) -> Result<usize, StorageError>;

    /// Replace the mutable fields of the row with `condition.uuid`.
    /// `quality_gate_id` and `created_at` are never rewritten.
    /// Returns the stored row; `NotFound` when the uuid is unknown.
    fn update(&self, condition: &Condition) -> Result<Condition, StorageError>;

    /// Remove a condition. Idempotent: returns whether a row was removed.
    fn delete(&self, uuid: &str) -> Result<bool, StorageError>;

    /// Remove every condition whose metric is missing or disabled, atomically.
    /// Returns the number of rows removed.
    fn delete_conditions_with_invalid_metrics(&self) -> Result<usize, StorageError>;
}

impl<T: IConditionStorage + ?Sized> IConditionStorage for Arc<T> {
    fn insert(&self, condition: NewCondition) -> Result<Condition, StorageError> {
        (**self).insert(condition)
    }
    fn select_by_uuid(&self, uuid: &str) -> Result<Option<Condition>, StorageError> {
        (**self).select_by_uuid(uuid)
    }
    fn select_for_quality_gate(
        &self,
        quality_gate_id: i64,
    ) -> Result<Vec<Condition>, StorageError> {
        (**self).select_for_quality_gate(quality_gate_id)
    }
    fn count_for_quality_gate(&self, quality_gate_id: i64) -> Result<usize, StorageError> {
        (**self).count_for_quality_gate(quality_gate_id)
    }
    fn update(&self, condition: &Condition) -> Result<Condition, StorageError> {
        (**self).update(condition)
    }
    fn delete(&self, uuid: &str) -> Result<bool, StorageError> {
        (**self).delete(uuid)
    }
    fn delete_conditions_with_invalid_metrics(&self) -> Result<usize, StorageError> {
        (**self).delete_conditions_with_invalid_metrics()
    }
}
