//! Simulation lifecycle: run, inspect, reset.
//!
//! A run executes each step in its own transaction; a step failure
//! leaves earlier steps committed and the model inspectable. Idempotent
//! by construction: any pre-existing prediction log aborts the run
//! before the first write.

use serde::Serialize;
use vigil_core::config::VigilConfig;
use vigil_core::constants::SIM_TRAJECTORY_DAYS;
use vigil_core::errors::SimulationError;
use vigil_core::types::{DeploymentStatus, GovernanceStatus};
use vigil_storage::queries::audit::{self, NewAuditEntry};
use vigil_storage::queries::{
    drift_metrics, fairness_metrics, models, prediction_logs, risk_history, util,
};
use vigil_storage::Database;

use super::generator::{self, RiskProfile, SyntheticRng};
use crate::{drift, fairness, governance, risk};

/// Knobs for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub profile: RiskProfile,
    pub protected_attribute: String,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            profile: RiskProfile::Computed,
            protected_attribute: "gender".to_string(),
        }
    }
}

/// What one simulation run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub model_id: i64,
    pub model_name: String,
    pub baseline_logs: usize,
    pub shifted_logs: usize,
    pub features_evaluated: usize,
    pub any_drift: bool,
    pub disparity_score: f64,
    pub fairness_flag: bool,
    pub drift_component: f64,
    pub fairness_component: f64,
    pub risk_score: f64,
    pub final_status: GovernanceStatus,
    pub risk_history_entries: i64,
}

/// Whether a model can still be simulated.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStatus {
    pub model_id: i64,
    pub model_exists: bool,
    pub log_count: i64,
    pub can_simulate: bool,
    pub blocked_reason: Option<String>,
}

/// What a reset removed.
#[derive(Debug, Clone, Serialize)]
pub struct ResetSummary {
    pub model_id: i64,
    pub deleted_prediction_logs: i64,
    pub deleted_drift_metrics: i64,
    pub deleted_fairness_metrics: i64,
    pub deleted_risk_entries: i64,
}

/// Run the full lifecycle simulation for a model.
///
/// Steps: seed baseline batch, seed shifted batch, drift evaluation,
/// fairness evaluation, risk composition, staged trajectory,
/// governance evaluation. Requires an active policy, like any other
/// governance evaluation.
pub fn run_simulation(
    db: &mut Database,
    config: &VigilConfig,
    model_id: i64,
    options: &SimulationOptions,
) -> Result<SimulationSummary, SimulationError> {
    let model = models::get_model(db.conn(), model_id)?
        .ok_or(SimulationError::ModelNotFound { model_id })?;

    let log_count = prediction_logs::count_logs(db.conn(), model_id)?;
    if log_count > 0 {
        return Err(SimulationError::AlreadySimulated {
            model_id,
            log_count,
        });
    }

    let sim = &config.simulation;
    let baseline_count = sim.effective_baseline_samples();
    let shifted_count = sim.effective_shifted_samples();
    let mut rng = SyntheticRng::new(sim.effective_seed() ^ model_id as u64);

    // Back-date traffic so the staged trajectory and the logs tell the
    // same 30-day story.
    let start = util::epoch_days_ago(SIM_TRAJECTORY_DAYS[0]);
    let baseline = generator::baseline_batch(&mut rng, model_id, baseline_count, start);
    let shifted_start = start + baseline_count as i64 * 3_600;
    let shifted = generator::shifted_batch(&mut rng, model_id, shifted_count, shifted_start);

    // Both batches land in one transaction: no partial logs survive a
    // failure here.
    let mut seed_batch = baseline;
    seed_batch.extend(shifted);
    prediction_logs::insert_batch(db.conn_mut(), &seed_batch)?;
    tracing::info!(
        model_id,
        baseline = baseline_count,
        shifted = shifted_count,
        "simulation: synthetic traffic seeded"
    );

    let drift_outcome = drift::run_drift_evaluation(db, model_id, &config.drift)?;
    let fairness_outcome = fairness::run_fairness_evaluation(
        db,
        model_id,
        &options.protected_attribute,
        &config.fairness,
    )?;
    let breakdown = risk::compose_risk(db, model_id).map_err(SimulationError::Storage)?;

    let trajectory = generator::staged_trajectory(
        model_id,
        &breakdown,
        options.profile,
        &SIM_TRAJECTORY_DAYS,
        util::now_epoch(),
    );
    risk_history::insert_batch(db.conn_mut(), &trajectory)?;

    let outcome = governance::evaluate_governance(db, model_id)?;

    let summary = SimulationSummary {
        model_id,
        model_name: model.model_name,
        baseline_logs: baseline_count,
        shifted_logs: shifted_count,
        features_evaluated: drift_outcome.metrics.len(),
        any_drift: drift_outcome.any_drift,
        disparity_score: fairness_outcome.disparity_score,
        fairness_flag: fairness_outcome.fairness_flag,
        drift_component: breakdown.drift_component,
        fairness_component: breakdown.fairness_component,
        risk_score: outcome.risk_score,
        final_status: outcome.status,
        risk_history_entries: risk_history::count_for_model(db.conn(), model_id)?,
    };

    audit::record_best_effort(
        db.conn(),
        &NewAuditEntry {
            model_id: Some(model_id),
            action: "simulation".to_string(),
            action_status: "success".to_string(),
            risk_score: Some(summary.risk_score),
            disparity_score: Some(summary.disparity_score),
            governance_status: Some(summary.final_status.as_str().to_string()),
            details: serde_json::to_value(&summary).ok(),
            ..Default::default()
        },
    );

    tracing::info!(
        model_id,
        risk_score = summary.risk_score,
        status = %summary.final_status,
        "simulation complete"
    );
    Ok(summary)
}

/// Whether a simulation can run for this model.
pub fn simulation_status(db: &Database, model_id: i64) -> Result<SimulationStatus, SimulationError> {
    if models::get_model(db.conn(), model_id)?.is_none() {
        return Ok(SimulationStatus {
            model_id,
            model_exists: false,
            log_count: 0,
            can_simulate: false,
            blocked_reason: Some("model not found".to_string()),
        });
    }
    let log_count = prediction_logs::count_logs(db.conn(), model_id)?;
    let can_simulate = log_count == 0;
    Ok(SimulationStatus {
        model_id,
        model_exists: true,
        log_count,
        can_simulate,
        blocked_reason: (!can_simulate)
            .then(|| format!("{log_count} prediction logs already exist")),
    })
}

/// Wipe a model's simulation artifacts and return it to draft.
///
/// Children go before the model row would; everything happens in one
/// transaction so a failure leaves the simulation fully intact.
pub fn reset_simulation(
    db: &mut Database,
    model_id: i64,
) -> Result<ResetSummary, SimulationError> {
    if models::get_model(db.conn(), model_id)?.is_none() {
        return Err(SimulationError::ModelNotFound { model_id });
    }

    let tx = db.conn_mut().transaction().map_err(|e| {
        SimulationError::Storage(vigil_core::errors::StorageError::from(e))
    })?;
    let summary = ResetSummary {
        model_id,
        deleted_prediction_logs: prediction_logs::delete_for_model(&tx, model_id)?,
        deleted_drift_metrics: drift_metrics::delete_for_model(&tx, model_id)?,
        deleted_fairness_metrics: fairness_metrics::delete_for_model(&tx, model_id)?,
        deleted_risk_entries: risk_history::delete_for_model(&tx, model_id)?,
    };
    models::update_status(&tx, model_id, GovernanceStatus::Draft)?;
    models::update_deployment_status(&tx, model_id, DeploymentStatus::Draft)?;
    tx.commit()
        .map_err(vigil_core::errors::StorageError::from)?;

    audit::record_best_effort(
        db.conn(),
        &NewAuditEntry {
            model_id: Some(model_id),
            action: "simulation_reset".to_string(),
            action_status: "success".to_string(),
            details: serde_json::to_value(&summary).ok(),
            ..Default::default()
        },
    );
    tracing::info!(
        model_id,
        deleted_logs = summary.deleted_prediction_logs,
        "simulation reset"
    );
    Ok(summary)
}
