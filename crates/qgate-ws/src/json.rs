//! JSON representation of conditions in responses.

use chrono::{DateTime, SecondsFormat, Utc};
use qgate_core::types::{Condition, Metric, MetricRef, QualityGate, User};
use serde_json::{json, Map, Value};

/// Epoch millis as an RFC 3339 UTC string; `None` when out of range.
pub fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A condition with its resolved metric, gate and last author.
/// A metric that no longer resolves is written as its raw reference.
pub fn write_condition(
    condition: &Condition,
    metric: Option<&Metric>,
    gate: &QualityGate,
    updated_by: Option<&User>,
) -> Value {
    let mut obj = Map::new();
    obj.insert("id".into(), json!(condition.uuid));
    obj.insert("gateId".into(), json!(gate.id));
    obj.insert("gateName".into(), json!(gate.name));
    match metric {
        Some(m) => {
            obj.insert("metric".into(), json!(m.key));
            obj.insert("metricType".into(), json!(m.value_type.as_str()));
        }
        None => {
            let raw = match &condition.metric {
                MetricRef::Uuid(uuid) => json!(uuid),
                MetricRef::Legacy(id) => json!(id),
            };
            obj.insert("metric".into(), raw);
        }
    }
    obj.insert("op".into(), json!(condition.operator));
    obj.insert("error".into(), json!(condition.error_threshold));
    if let Some(description) = &condition.description {
        obj.insert("description".into(), json!(description));
    }
    if let Some(user) = updated_by {
        obj.insert("updatedBy".into(), json!(user.login));
    }
    obj.insert("createdAt".into(), json!(format_timestamp(condition.created_at)));
    obj.insert("updatedAt".into(), json!(format_timestamp(condition.updated_at)));
    Value::Object(obj)
}
