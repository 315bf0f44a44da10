//! Threshold values are stored as strings; they must still parse as the
//! metric's value type.

use qgate_core::types::MetricType;

use crate::error::WsError;

const LEVELS: [&str; 3] = ["OK", "WARN", "ERROR"];

/// Check `value` against `metric_type` and return the form to store.
pub fn validate_threshold(value: &str, metric_type: MetricType) -> Result<String, WsError> {
    let v = value.trim();
    let ok = match metric_type {
        MetricType::Int => v.parse::<i32>().is_ok(),
        MetricType::Rating => v.parse::<i32>().is_ok_and(|r| (1..=5).contains(&r)),
        MetricType::Float | MetricType::Percent => v.parse::<f64>().is_ok_and(f64::is_finite),
        MetricType::Bool => v == "true" || v == "false",
        MetricType::Millisec | MetricType::WorkDur => v.parse::<i64>().is_ok(),
        MetricType::Level => LEVELS.contains(&v),
        MetricType::String | MetricType::Data | MetricType::Distrib => !v.is_empty(),
    };
    if ok {
        Ok(v.to_string())
    } else {
        Err(WsError::BadRequest(expectation(value, metric_type)))
    }
}

fn expectation(value: &str, metric_type: MetricType) -> String {
    match metric_type {
        MetricType::Int => format!("Value '{value}' must be an integer."),
        MetricType::Rating => format!("Value '{value}' must be a rating between 1 and 5."),
        MetricType::Float | MetricType::Percent => format!("Value '{value}' must be a number."),
        MetricType::Bool => format!("Value '{value}' must be one of \"true\", \"false\"."),
        MetricType::Millisec | MetricType::WorkDur => format!("Value '{value}' must be a long."),
        MetricType::Level => format!("Value '{value}' must be one of {}.", LEVELS.join(", ")),
        MetricType::String | MetricType::Data | MetricType::Distrib => {
            "Value must not be empty.".to_string()
        }
    }
}
