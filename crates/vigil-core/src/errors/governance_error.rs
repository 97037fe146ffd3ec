//! Governance evaluation and deployment errors.

use super::error_code::{self, VigilErrorCode};
use super::storage_error::StorageError;

/// Errors that can occur during governance evaluation, policy
/// administration, and deployment gating.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    #[error("No active governance policy; evaluation aborted")]
    NoActivePolicy,

    #[error("Model {model_id} not found")]
    ModelNotFound { model_id: i64 },

    #[error("Policy '{name}' already exists")]
    DuplicatePolicy { name: String },

    #[error("Policy {policy_id} not found")]
    PolicyNotFound { policy_id: i64 },

    #[error("Deployment rejected: {reason}")]
    DeploymentBlocked { reason: String },

    #[error("Deployment requires an explicit override: {reason}")]
    OverrideRequired { reason: String },

    #[error("Override deployments require a non-empty justification")]
    JustificationRequired,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl VigilErrorCode for GovernanceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActivePolicy => error_code::NO_ACTIVE_POLICY,
            Self::ModelNotFound { .. } => error_code::MODEL_NOT_FOUND,
            Self::DuplicatePolicy { .. } => error_code::POLICY_CONFLICT,
            Self::PolicyNotFound { .. } => error_code::GOVERNANCE_ERROR,
            Self::DeploymentBlocked { .. }
            | Self::OverrideRequired { .. }
            | Self::JustificationRequired => error_code::DEPLOYMENT_REJECTED,
            Self::Storage(e) => e.error_code(),
        }
    }
}
