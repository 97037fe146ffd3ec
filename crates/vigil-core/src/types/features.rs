//! Input feature maps for prediction logs.

use serde_json::Value;
use std::collections::BTreeMap;

/// Feature name to value mapping for one prediction log.
/// BTreeMap keeps serialization deterministic.
pub type FeatureMap = BTreeMap<String, Value>;

/// Extract a numeric value from a feature, if it has one.
///
/// Numbers come through directly; numeric strings are parsed.
/// Categorical values return `None` and are skipped by the drift
/// detector (they cannot feed PSI/KS).
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
