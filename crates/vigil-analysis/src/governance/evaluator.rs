//! Governance status evaluation against the active policy.

use vigil_core::errors::GovernanceError;
use vigil_core::types::GovernanceStatus;
use vigil_storage::queries::audit::{self, NewAuditEntry};
use vigil_storage::queries::policies::PolicyRecord;
use vigil_storage::queries::{fairness_metrics, models, policies, risk_history};
use vigil_storage::Database;

/// A pure policy decision: the resulting status and the rule that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceDecision {
    pub status: GovernanceStatus,
    pub reason: String,
}

/// Result of a persisted governance evaluation.
#[derive(Debug, Clone)]
pub struct GovernanceOutcome {
    pub model_id: i64,
    pub status: GovernanceStatus,
    pub reason: String,
    pub risk_score: f64,
    pub disparity_score: f64,
    pub policy_name: String,
}

/// Apply policy rules to a risk score and disparity. Pure, no I/O;
/// the same inputs always yield the same decision.
///
/// Rules fire in priority order: hard risk ceiling, disparity ceiling,
/// approval band, then approved.
pub fn decide(risk_score: f64, disparity_score: f64, policy: &PolicyRecord) -> GovernanceDecision {
    if risk_score > policy.max_allowed_mri {
        return GovernanceDecision {
            status: GovernanceStatus::Blocked,
            reason: format!(
                "risk score {risk_score:.1} exceeds policy ceiling {:.1}",
                policy.max_allowed_mri
            ),
        };
    }
    if disparity_score > policy.max_allowed_disparity {
        return GovernanceDecision {
            status: GovernanceStatus::AtRisk,
            reason: format!(
                "disparity {disparity_score:.3} exceeds policy ceiling {:.3}",
                policy.max_allowed_disparity
            ),
        };
    }
    if risk_score > policy.approval_required_above_mri {
        return GovernanceDecision {
            status: GovernanceStatus::AtRisk,
            reason: format!(
                "risk score {risk_score:.1} exceeds approval threshold {:.1}",
                policy.approval_required_above_mri
            ),
        };
    }
    GovernanceDecision {
        status: GovernanceStatus::Approved,
        reason: "within all policy thresholds".to_string(),
    }
}

/// Evaluate a model against the active policy and persist the
/// resulting status.
///
/// Fails closed: no active policy means no evaluation, and the model's
/// previous status stands. Missing risk or fairness metrics read as
/// zero. Writes one audit entry on success.
pub fn evaluate_governance(
    db: &Database,
    model_id: i64,
) -> Result<GovernanceOutcome, GovernanceError> {
    if models::get_model(db.conn(), model_id)?.is_none() {
        return Err(GovernanceError::ModelNotFound { model_id });
    }
    let policy = policies::active_policy(db.conn())?.ok_or(GovernanceError::NoActivePolicy)?;

    let risk_score = risk_history::latest(db.conn(), model_id)?
        .map(|entry| entry.risk_score)
        .unwrap_or(0.0);
    let disparity_score = fairness_metrics::latest(db.conn(), model_id)?
        .map(|m| m.disparity_score)
        .unwrap_or(0.0);

    let decision = decide(risk_score, disparity_score, &policy);
    models::update_status(db.conn(), model_id, decision.status)?;

    audit::record_best_effort(
        db.conn(),
        &NewAuditEntry {
            model_id: Some(model_id),
            action: "governance_evaluation".to_string(),
            action_status: "success".to_string(),
            risk_score: Some(risk_score),
            disparity_score: Some(disparity_score),
            governance_status: Some(decision.status.as_str().to_string()),
            details: Some(serde_json::json!({
                "policy": policy.name,
                "reason": decision.reason,
            })),
            ..Default::default()
        },
    );

    tracing::info!(
        model_id,
        policy = %policy.name,
        status = %decision.status,
        reason = %decision.reason,
        "governance evaluated"
    );

    Ok(GovernanceOutcome {
        model_id,
        status: decision.status,
        reason: decision.reason,
        risk_score,
        disparity_score,
        policy_name: policy.name,
    })
}
