//! The deployment gate.
//!
//! Deployment re-evaluates governance first, so the decision is always
//! made against the current policy and metrics, never a stale status.

use vigil_core::errors::GovernanceError;
use vigil_core::types::{DeploymentStatus, GovernanceStatus};
use vigil_storage::queries::audit::{self, NewAuditEntry};
use vigil_storage::queries::models;
use vigil_storage::Database;

use super::evaluator::evaluate_governance;

/// A deployment attempt.
#[derive(Debug, Clone, Default)]
pub struct DeployRequest {
    /// Acknowledge an at-risk status and deploy anyway.
    pub override_at_risk: bool,
    /// Required whenever the override is used; lands in the audit log.
    pub justification: Option<String>,
}

/// Attempt to deploy a model.
///
/// Blocked models are never deployable, override or not. At-risk
/// models deploy only with an explicit override carrying a non-empty
/// justification. The governance status itself is left untouched;
/// only deployment_status transitions.
pub fn deploy_model(
    db: &Database,
    model_id: i64,
    request: &DeployRequest,
) -> Result<DeploymentStatus, GovernanceError> {
    let outcome = evaluate_governance(db, model_id)?;

    let rejection = match outcome.status {
        GovernanceStatus::Blocked => Some(GovernanceError::DeploymentBlocked {
            reason: outcome.reason.clone(),
        }),
        GovernanceStatus::AtRisk if !request.override_at_risk => {
            Some(GovernanceError::OverrideRequired {
                reason: outcome.reason.clone(),
            })
        }
        GovernanceStatus::AtRisk
            if request
                .justification
                .as_deref()
                .map_or(true, |j| j.trim().is_empty()) =>
        {
            Some(GovernanceError::JustificationRequired)
        }
        _ => None,
    };

    if let Some(error) = rejection {
        audit::record_best_effort(
            db.conn(),
            &NewAuditEntry {
                model_id: Some(model_id),
                action: "deployment".to_string(),
                action_status: "rejected".to_string(),
                risk_score: Some(outcome.risk_score),
                disparity_score: Some(outcome.disparity_score),
                governance_status: Some(outcome.status.as_str().to_string()),
                override_used: Some(request.override_at_risk),
                details: Some(serde_json::json!({ "reason": error.to_string() })),
                ..Default::default()
            },
        );
        tracing::warn!(model_id, status = %outcome.status, error = %error, "deployment rejected");
        return Err(error);
    }

    let override_used = outcome.status == GovernanceStatus::AtRisk;
    models::update_deployment_status(db.conn(), model_id, DeploymentStatus::Deployed)?;

    audit::record_best_effort(
        db.conn(),
        &NewAuditEntry {
            model_id: Some(model_id),
            action: "deployment".to_string(),
            action_status: "success".to_string(),
            risk_score: Some(outcome.risk_score),
            disparity_score: Some(outcome.disparity_score),
            governance_status: Some(outcome.status.as_str().to_string()),
            deployment_status: Some(DeploymentStatus::Deployed.as_str().to_string()),
            override_used: Some(override_used),
            details: request
                .justification
                .as_ref()
                .map(|j| serde_json::json!({ "justification": j })),
            ..Default::default()
        },
    );

    tracing::info!(model_id, override_used, "model deployed");
    Ok(DeploymentStatus::Deployed)
}
