//! Metrics referenced by conditions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Value type of a metric; drives how a condition threshold is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    Int,
    Float,
    Percent,
    Bool,
    String,
    Millisec,
    Data,
    Level,
    Distrib,
    Rating,
    WorkDur,
}

impl MetricType {
    pub const ALL: [MetricType; 11] = [
        Self::Int,
        Self::Float,
        Self::Percent,
        Self::Bool,
        Self::String,
        Self::Millisec,
        Self::Data,
        Self::Level,
        Self::Distrib,
        Self::Rating,
        Self::WorkDur,
    ];

    /// Column representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Percent => "PERCENT",
            Self::Bool => "BOOL",
            Self::String => "STRING",
            Self::Millisec => "MILLISEC",
            Self::Data => "DATA",
            Self::Level => "LEVEL",
            Self::Distrib => "DISTRIB",
            Self::Rating => "RATING",
            Self::WorkDur => "WORK_DUR",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown metric type: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Legacy numeric identifier.
    pub id: i64,
    /// Stable identifier.
    pub uuid: String,
    pub key: String,
    pub value_type: MetricType,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMetric {
    pub key: String,
    pub value_type: MetricType,
    pub enabled: bool,
}

impl NewMetric {
    /// An enabled metric.
    pub fn new(key: impl Into<String>, value_type: MetricType) -> Self {
        Self {
            key: key.into(),
            value_type,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
