//! Policy administration: create, update, activate.
//!
//! Thresholds are validated before any write. Activation is delegated
//! to the storage layer, which swaps the single active policy inside
//! one transaction.

use vigil_core::errors::{GovernanceError, MonitorError, StorageError, ValidationError};
use vigil_storage::queries::policies::{self, NewPolicy, PolicyRecord};
use vigil_storage::Database;

/// Threshold changes for an existing policy. `None` keeps the current
/// value.
#[derive(Debug, Clone, Default)]
pub struct PolicyUpdate {
    pub max_allowed_mri: Option<f64>,
    pub max_allowed_disparity: Option<f64>,
    pub approval_required_above_mri: Option<f64>,
}

fn validate_thresholds(
    mri: f64,
    disparity: f64,
    approval_above: f64,
) -> Result<(), ValidationError> {
    check_range("max_allowed_mri", mri, 0.0, 100.0)?;
    check_range("max_allowed_disparity", disparity, 0.0, 1.0)?;
    check_range("approval_required_above_mri", approval_above, 0.0, 100.0)?;
    Ok(())
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::ThresholdOutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// Create a new policy (inactive). Duplicate names are rejected.
pub fn create_policy(db: &Database, policy: &NewPolicy) -> Result<PolicyRecord, MonitorError> {
    if policy.name.trim().is_empty() {
        return Err(ValidationError::EmptyPolicyName.into());
    }
    validate_thresholds(
        policy.max_allowed_mri,
        policy.max_allowed_disparity,
        policy.approval_required_above_mri,
    )?;

    let id = policies::insert_policy(db.conn(), policy).map_err(|e| match e {
        StorageError::ConstraintViolation { .. } => {
            MonitorError::Governance(GovernanceError::DuplicatePolicy {
                name: policy.name.clone(),
            })
        }
        other => MonitorError::Storage(other),
    })?;

    tracing::info!(policy_id = id, name = %policy.name, "policy created");
    policies::get_policy(db.conn(), id)?.ok_or(MonitorError::Storage(
        StorageError::RowNotFound {
            entity: "policy",
            id,
        },
    ))
}

/// Apply threshold changes to an existing policy.
pub fn update_policy_thresholds(
    db: &Database,
    policy_id: i64,
    update: &PolicyUpdate,
) -> Result<PolicyRecord, MonitorError> {
    let mut policy = policies::get_policy(db.conn(), policy_id)?.ok_or(
        MonitorError::Governance(GovernanceError::PolicyNotFound { policy_id }),
    )?;

    if let Some(mri) = update.max_allowed_mri {
        policy.max_allowed_mri = mri;
    }
    if let Some(disparity) = update.max_allowed_disparity {
        policy.max_allowed_disparity = disparity;
    }
    if let Some(approval) = update.approval_required_above_mri {
        policy.approval_required_above_mri = approval;
    }
    validate_thresholds(
        policy.max_allowed_mri,
        policy.max_allowed_disparity,
        policy.approval_required_above_mri,
    )?;

    policies::update_policy(db.conn(), &policy)?;
    tracing::info!(policy_id, name = %policy.name, "policy thresholds updated");
    Ok(policy)
}

/// Make a policy the single active one.
pub fn activate_policy(db: &mut Database, policy_id: i64) -> Result<(), MonitorError> {
    policies::activate_policy(db.conn_mut(), policy_id).map_err(|e| match e {
        StorageError::RowNotFound { .. } => {
            MonitorError::Governance(GovernanceError::PolicyNotFound { policy_id })
        }
        other => MonitorError::Storage(other),
    })?;
    tracing::info!(policy_id, "policy activated");
    Ok(())
}
