//! Quality-gate condition: one threshold rule owned by a quality gate.

use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

/// Reference from a condition to its metric.
///
/// Rows written before the uuid migration only carry the legacy numeric id.
/// When a row carries both, the stable uuid wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricRef {
    Uuid(String),
    Legacy(i64),
}

impl MetricRef {
    pub fn uuid(&self) -> Option<&str> {
        match self {
            Self::Uuid(uuid) => Some(uuid),
            Self::Legacy(_) => None,
        }
    }

    pub fn legacy_id(&self) -> Option<i64> {
        match self {
            Self::Uuid(_) => None,
            Self::Legacy(id) => Some(*id),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Uuid(uuid) if uuid.trim().is_empty())
    }
}

/// A persisted condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub uuid: String,
    pub quality_gate_id: i64,
    pub metric: MetricRef,
    pub operator: String,
    pub error_threshold: String,
    pub description: Option<String>,
    /// Uuid of the user who last changed the condition through a request handler.
    pub updated_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Condition {
    /// Check the fields an update is allowed to replace.
    pub fn check_mutable_fields(&self) -> Result<(), StorageError> {
        if self.metric.is_blank() {
            return Err(StorageError::ConstraintViolation { field: "metric" });
        }
        if self.operator.trim().is_empty() {
            return Err(StorageError::ConstraintViolation { field: "operator" });
        }
        if self.error_threshold.trim().is_empty() {
            return Err(StorageError::ConstraintViolation {
                field: "error_threshold",
            });
        }
        Ok(())
    }
}

/// Insert payload. Every field except `description` is required; a missing
/// or blank value is rejected with [`StorageError::ConstraintViolation`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCondition {
    pub quality_gate_id: Option<i64>,
    pub metric: Option<MetricRef>,
    pub operator: Option<String>,
    pub error_threshold: Option<String>,
    pub description: Option<String>,
}

/// A [`NewCondition`] whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCondition {
    pub quality_gate_id: i64,
    pub metric: MetricRef,
    pub operator: String,
    pub error_threshold: String,
    pub description: Option<String>,
}

impl NewCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality_gate_id(mut self, id: i64) -> Self {
        self.quality_gate_id = Some(id);
        self
    }

    pub fn metric_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.metric = Some(MetricRef::Uuid(uuid.into()));
        self
    }

    pub fn legacy_metric_id(mut self, id: i64) -> Self {
        self.metric = Some(MetricRef::Legacy(id));
        self
    }

    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn error_threshold(mut self, threshold: impl Into<String>) -> Self {
        self.error_threshold = Some(threshold.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check required fields, in declaration order.
    pub fn validated(self) -> Result<ValidatedCondition, StorageError> {
        let quality_gate_id = self.quality_gate_id.ok_or(StorageError::ConstraintViolation {
            field: "quality_gate_id",
        })?;
        let metric = self
            .metric
            .filter(|m| !m.is_blank())
            .ok_or(StorageError::ConstraintViolation { field: "metric" })?;
        let operator = non_blank(self.operator)
            .ok_or(StorageError::ConstraintViolation { field: "operator" })?;
        let error_threshold = non_blank(self.error_threshold).ok_or(
            StorageError::ConstraintViolation {
                field: "error_threshold",
            },
        )?;
        Ok(ValidatedCondition {
            quality_gate_id,
            metric,
            operator,
            error_threshold,
            description: self.description,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
