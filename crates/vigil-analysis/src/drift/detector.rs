//! Windowed drift evaluation over a model's prediction logs.

use vigil_core::config::DriftConfig;
use vigil_core::errors::{DriftError, StorageError};
use vigil_core::types::numeric_value;
use vigil_storage::queries::drift_metrics::{self, NewDriftMetric};
use vigil_storage::queries::prediction_logs::{self, PredictionLogRecord};
use vigil_storage::queries::{models, util};
use vigil_storage::Database;

/// Result of one drift evaluation run.
#[derive(Debug, Clone)]
pub struct DriftOutcome {
    pub metrics: Vec<NewDriftMetric>,
    pub features_skipped: Vec<String>,
    pub any_drift: bool,
}

/// Name under which the model's own output score is monitored,
/// alongside the input features.
const PREDICTION_FEATURE: &str = "prediction";

/// Run drift evaluation for a model and persist one metric row per
/// monitored numeric feature, atomically.
///
/// The baseline window is the earliest N logs and the recent window
/// the most recent M; the run fails with `InsufficientData` until the
/// model has at least N + M logs. Features without enough numeric
/// values in both windows are skipped, not fatal.
pub fn run_drift_evaluation(
    db: &mut Database,
    model_id: i64,
    config: &DriftConfig,
) -> Result<DriftOutcome, DriftError> {
    if models::get_model(db.conn(), model_id)?.is_none() {
        return Err(DriftError::Storage(StorageError::RowNotFound {
            entity: "model",
            id: model_id,
        }));
    }

    let logs = prediction_logs::load_ordered(db.conn(), model_id)?;
    let baseline_len = config.effective_baseline_window();
    let recent_len = config.effective_recent_window();
    let required = baseline_len + recent_len;
    if logs.len() < required {
        return Err(DriftError::InsufficientData {
            required,
            actual: logs.len(),
        });
    }

    let baseline = &logs[..baseline_len];
    let recent = &logs[logs.len() - recent_len..];

    let mut monitored = prediction_logs::sample_feature_names(db.conn(), model_id)?;
    monitored.push(PREDICTION_FEATURE.to_string());

    let psi_threshold = config.effective_psi_threshold();
    let ks_threshold = config.effective_ks_threshold();
    let timestamp = util::now_epoch();

    let mut metrics = Vec::new();
    let mut features_skipped = Vec::new();
    for feature in monitored {
        let baseline_values = numeric_series(baseline, &feature);
        let recent_values = numeric_series(recent, &feature);
        // Degenerate windows (categorical or near-empty) carry no
        // distributional signal.
        if baseline_values.len() < 2 || recent_values.len() < 2 {
            features_skipped.push(feature);
            continue;
        }

        let psi = super::population_stability_index(&baseline_values, &recent_values);
        let ks = super::ks_statistic(&baseline_values, &recent_values);
        metrics.push(NewDriftMetric {
            model_id,
            feature_name: feature,
            psi_value: psi,
            ks_statistic: ks,
            drift_flag: psi >= psi_threshold || ks >= ks_threshold,
            timestamp,
        });
    }

    if metrics.is_empty() {
        return Err(DriftError::NoNumericFeatures);
    }

    drift_metrics::insert_batch(db.conn_mut(), &metrics)?;

    let any_drift = metrics.iter().any(|m| m.drift_flag);
    tracing::info!(
        model_id,
        features_evaluated = metrics.len(),
        features_skipped = features_skipped.len(),
        any_drift,
        "drift evaluation complete"
    );

    Ok(DriftOutcome {
        metrics,
        features_skipped,
        any_drift,
    })
}

fn numeric_series(logs: &[PredictionLogRecord], feature: &str) -> Vec<f64> {
    if feature == PREDICTION_FEATURE {
        return logs.iter().map(|log| log.prediction).collect();
    }
    logs.iter()
        .filter_map(|log| log.input_features.get(feature).and_then(numeric_value))
        .collect()
}
