//! # qgate-core
//!
//! Foundation crate for the quality-gate condition store.
//! Defines types, storage traits, errors, config, clock and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod clock;
pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::QGateConfig;
pub use errors::{QGateErrorCode, StorageError};
pub use types::{Condition, Metric, MetricRef, MetricType, NewCondition, QualityGate, User};
