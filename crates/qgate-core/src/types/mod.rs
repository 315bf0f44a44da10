//! Domain types persisted by the condition store.

pub mod condition;
pub mod metric;
pub mod quality_gate;
pub mod user;

pub use condition::{Condition, MetricRef, NewCondition, ValidatedCondition};
pub use metric::{Metric, MetricType, NewMetric};
pub use quality_gate::QualityGate;
pub use user::{NewUser, User};
