//! Per-table query functions. Callers pick the connection and own the
//! transaction; nothing here begins or commits.

pub mod conditions;
pub mod metrics;
pub mod quality_gates;
pub mod users;
