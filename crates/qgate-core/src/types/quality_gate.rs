//! Quality gates own conditions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityGate {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    /// Built-in gates ship with the product and cannot be edited.
    pub built_in: bool,
    pub created_at: i64,
}
