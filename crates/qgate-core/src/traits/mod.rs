//! Shared traits used across qgate crates.

pub mod storage;

pub use storage::{IConditionStorage, IMetricStorage, IQualityGateStorage, IUserStorage};
