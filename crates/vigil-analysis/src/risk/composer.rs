//! Composes drift and fairness signals into the Model Risk Index.

use vigil_core::constants::{
    DRIFT_KS_WEIGHT, DRIFT_PSI_WEIGHT, MRI_DRIFT_SHARE, MRI_FAIRNESS_SHARE,
};
use vigil_core::errors::StorageError;
use vigil_storage::queries::risk_history::{self, NewRiskEntry};
use vigil_storage::queries::{drift_metrics, fairness_metrics, models, util};
use vigil_storage::Database;

/// The Model Risk Index and its two inputs, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RiskBreakdown {
    pub risk_score: f64,
    pub drift_component: f64,
    pub fairness_component: f64,
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Pure composition from raw signal averages.
///
/// Drift: avg PSI weighted 60, avg KS weighted 40, clamped to [0, 100].
/// Fairness: disparity scaled to [0, 100]. The index blends them
/// 60/40 drift-to-fairness.
pub fn compose_components(avg_psi: f64, avg_ks: f64, disparity: f64) -> RiskBreakdown {
    let drift_component = clamp_score(avg_psi * DRIFT_PSI_WEIGHT + avg_ks * DRIFT_KS_WEIGHT);
    let fairness_component = clamp_score(disparity * 100.0);
    RiskBreakdown {
        risk_score: clamp_score(
            drift_component * MRI_DRIFT_SHARE + fairness_component * MRI_FAIRNESS_SHARE,
        ),
        drift_component,
        fairness_component,
    }
}

/// Recompute the Model Risk Index from the latest persisted metrics
/// and append one risk_history entry.
///
/// Drift input is the latest metric row per feature, so recomputing
/// between evaluation runs is idempotent. Missing metrics contribute
/// zero rather than failing; a freshly registered model scores 0.
pub fn compose_risk(db: &Database, model_id: i64) -> Result<RiskBreakdown, StorageError> {
    if models::get_model(db.conn(), model_id)?.is_none() {
        return Err(StorageError::RowNotFound {
            entity: "model",
            id: model_id,
        });
    }

    let latest_drift = drift_metrics::latest_per_feature(db.conn(), model_id)?;
    let (avg_psi, avg_ks) = if latest_drift.is_empty() {
        (0.0, 0.0)
    } else {
        let n = latest_drift.len() as f64;
        (
            latest_drift.iter().map(|m| m.psi_value).sum::<f64>() / n,
            latest_drift.iter().map(|m| m.ks_statistic).sum::<f64>() / n,
        )
    };

    let disparity = fairness_metrics::latest(db.conn(), model_id)?
        .map(|m| m.disparity_score)
        .unwrap_or(0.0);

    let breakdown = compose_components(avg_psi, avg_ks, disparity);
    risk_history::insert_entry(
        db.conn(),
        &NewRiskEntry {
            model_id,
            risk_score: breakdown.risk_score,
            drift_component: breakdown.drift_component,
            fairness_component: breakdown.fairness_component,
            timestamp: util::now_epoch(),
        },
    )?;

    tracing::info!(
        model_id,
        risk_score = breakdown.risk_score,
        drift_component = breakdown.drift_component,
        fairness_component = breakdown.fairness_component,
        "risk index recomputed"
    );
    Ok(breakdown)
}
