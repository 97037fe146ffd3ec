//! Prediction log ingestion.
//!
//! Every record is validated before any write; batches validate in
//! full up front so a bad record never leaves partial state behind.

use vigil_core::config::VigilConfig;
use vigil_core::errors::{MonitorError, MonitorResult, StorageError, ValidationError};
use vigil_core::types::FeatureMap;
use vigil_storage::queries::prediction_logs::{self, NewPredictionLog};
use vigil_storage::queries::models;
use vigil_storage::Database;

use crate::{drift, risk};

/// Reject malformed input before it reaches storage.
pub fn validate_log(
    features: &FeatureMap,
    prediction: f64,
    actual_label: Option<f64>,
) -> Result<(), ValidationError> {
    if features.is_empty() {
        return Err(ValidationError::EmptyFeatures);
    }
    if !prediction.is_finite() {
        return Err(ValidationError::NonFinitePrediction { value: prediction });
    }
    if let Some(label) = actual_label {
        if !label.is_finite() {
            return Err(ValidationError::NonFiniteLabel { value: label });
        }
    }
    Ok(())
}

/// Ingest a single prediction log. Returns the new row id.
pub fn ingest_log(
    db: &mut Database,
    config: &VigilConfig,
    log: &NewPredictionLog,
) -> MonitorResult<i64> {
    validate_log(&log.input_features, log.prediction, log.actual_label)?;
    ensure_model_exists(db, log.model_id)?;

    let id = prediction_logs::insert_log(db.conn(), log)?;
    maybe_auto_evaluate(db, config, log.model_id);
    Ok(id)
}

/// Ingest a batch of prediction logs atomically. All records must
/// validate and reference the same model.
pub fn ingest_batch(
    db: &mut Database,
    config: &VigilConfig,
    model_id: i64,
    logs: &[NewPredictionLog],
) -> MonitorResult<usize> {
    for log in logs {
        if log.model_id != model_id {
            return Err(ValidationError::BatchModelMismatch {
                expected: model_id,
                found: log.model_id,
            }
            .into());
        }
        validate_log(&log.input_features, log.prediction, log.actual_label)?;
    }
    ensure_model_exists(db, model_id)?;

    let inserted = prediction_logs::insert_batch(db.conn_mut(), logs)?;
    tracing::info!(model_id, inserted, "prediction batch ingested");
    maybe_auto_evaluate(db, config, model_id);
    Ok(inserted)
}

fn ensure_model_exists(db: &Database, model_id: i64) -> Result<(), MonitorError> {
    if models::get_model(db.conn(), model_id)?.is_none() {
        return Err(StorageError::RowNotFound {
            entity: "model",
            id: model_id,
        }
        .into());
    }
    Ok(())
}

/// Kick off drift evaluation and risk recomputation once ingestion has
/// filled both windows. Evaluation failures are logged, never surfaced
/// to the ingest caller.
fn maybe_auto_evaluate(db: &mut Database, config: &VigilConfig, model_id: i64) {
    if !config.effective_auto_evaluate() {
        return;
    }
    let required =
        (config.drift.effective_baseline_window() + config.drift.effective_recent_window()) as i64;
    let count = match prediction_logs::count_logs(db.conn(), model_id) {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(model_id, error = %e, "auto-evaluate count failed");
            return;
        }
    };
    if count < required {
        return;
    }

    if let Err(e) = drift::run_drift_evaluation(db, model_id, &config.drift) {
        tracing::warn!(model_id, error = %e, "auto drift evaluation failed");
        return;
    }
    if let Err(e) = risk::compose_risk(db, model_id) {
        tracing::warn!(model_id, error = %e, "auto risk recomputation failed");
    }
}
