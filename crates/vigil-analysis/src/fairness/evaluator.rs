//! Approval-rate disparity across protected-attribute groups.

use rustc_hash::FxHashMap;
use serde_json::Value;
use vigil_core::config::FairnessConfig;
use vigil_core::errors::{FairnessError, StorageError};
use vigil_storage::queries::fairness_metrics::{self, NewFairnessMetric};
use vigil_storage::queries::{models, policies, prediction_logs, util};
use vigil_storage::Database;

/// Per-group outcome counts.
#[derive(Debug, Clone, Default)]
pub struct GroupStats {
    pub total: i64,
    pub positive: i64,
}

impl GroupStats {
    pub fn approval_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.positive as f64 / self.total as f64
        }
    }
}

/// Result of one fairness evaluation run.
#[derive(Debug, Clone)]
pub struct FairnessOutcome {
    pub disparity_score: f64,
    pub fairness_flag: bool,
    pub groups: Vec<NewFairnessMetric>,
}

/// Run fairness evaluation for one protected attribute and persist one
/// metric row per group, atomically.
///
/// A prediction counts as positive by its actual label when one is
/// recorded, otherwise by the prediction score against the decision
/// threshold. Disparity is the max-min gap in group approval rates;
/// the flag threshold comes from the active policy, falling back to
/// the configured default when no policy is active.
pub fn run_fairness_evaluation(
    db: &mut Database,
    model_id: i64,
    protected_attribute: &str,
    config: &FairnessConfig,
) -> Result<FairnessOutcome, FairnessError> {
    if models::get_model(db.conn(), model_id)?.is_none() {
        return Err(FairnessError::Storage(StorageError::RowNotFound {
            entity: "model",
            id: model_id,
        }));
    }
    if protected_attribute.trim().is_empty() {
        return Err(FairnessError::AttributeMissing {
            attribute: protected_attribute.to_string(),
        });
    }

    let logs = prediction_logs::load_ordered(db.conn(), model_id)?;
    let decision_threshold = config.effective_decision_threshold();

    let mut stats: FxHashMap<String, GroupStats> = FxHashMap::default();
    for log in &logs {
        let Some(value) = log.input_features.get(protected_attribute) else {
            continue;
        };
        let group = group_label(value);
        let positive = match log.actual_label {
            Some(label) => label >= decision_threshold,
            None => log.prediction > decision_threshold,
        };
        let entry = stats.entry(group).or_default();
        entry.total += 1;
        if positive {
            entry.positive += 1;
        }
    }

    if stats.is_empty() {
        return Err(FairnessError::AttributeMissing {
            attribute: protected_attribute.to_string(),
        });
    }
    if stats.len() < 2 {
        return Err(FairnessError::InsufficientGroups { found: stats.len() });
    }

    let mut max_rate = f64::NEG_INFINITY;
    let mut min_rate = f64::INFINITY;
    for group in stats.values() {
        let rate = group.approval_rate();
        max_rate = max_rate.max(rate);
        min_rate = min_rate.min(rate);
    }
    let disparity_score = max_rate - min_rate;

    let disparity_threshold = match policies::active_policy(db.conn())? {
        Some(policy) => policy.max_allowed_disparity,
        None => {
            let fallback = config.effective_disparity_threshold();
            tracing::warn!(
                model_id,
                fallback,
                "no active policy; flagging disparity against the configured default"
            );
            fallback
        }
    };
    let fairness_flag = disparity_score > disparity_threshold;

    let timestamp = util::now_epoch();
    let mut group_names: Vec<&String> = stats.keys().collect();
    group_names.sort();
    let groups: Vec<NewFairnessMetric> = group_names
        .into_iter()
        .map(|name| {
            let group = &stats[name];
            NewFairnessMetric {
                model_id,
                protected_attribute: protected_attribute.to_string(),
                group_name: name.clone(),
                total_predictions: group.total,
                positive_predictions: group.positive,
                approval_rate: group.approval_rate(),
                disparity_score,
                fairness_flag,
                timestamp,
            }
        })
        .collect();

    fairness_metrics::insert_batch(db.conn_mut(), &groups)?;

    tracing::info!(
        model_id,
        protected_attribute,
        groups = groups.len(),
        disparity_score,
        fairness_flag,
        "fairness evaluation complete"
    );

    Ok(FairnessOutcome {
        disparity_score,
        fairness_flag,
        groups,
    })
}

fn group_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
