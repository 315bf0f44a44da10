//! Storage trait module: re-exports all storage traits.
//!
//! These traits define the contract between request handling and the
//! underlying storage backend. The SQLite implementation lives in
//! `qgate-storage`. All traits are object-safe, `Send + Sync`, and have
//! blanket `Arc<T>` impls.

pub mod condition_storage;
pub mod metric_storage;
pub mod quality_gate_storage;
pub mod user_storage;

pub use condition_storage::IConditionStorage;
pub use metric_storage::IMetricStorage;
pub use quality_gate_storage::IQualityGateStorage;
pub use user_storage::IUserStorage;
