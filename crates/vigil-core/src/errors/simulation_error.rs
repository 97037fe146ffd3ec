//! Simulation orchestrator errors.

use super::drift_error::DriftError;
use super::error_code::{self, VigilErrorCode};
use super::fairness_error::FairnessError;
use super::governance_error::GovernanceError;
use super::storage_error::StorageError;

/// Errors that can occur while running, inspecting, or resetting a
/// simulation. Step failures carry the underlying subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Model {model_id} not found")]
    ModelNotFound { model_id: i64 },

    #[error("Model {model_id} already has {log_count} prediction logs; simulation runs once")]
    AlreadySimulated { model_id: i64, log_count: i64 },

    #[error("Drift evaluation failed: {0}")]
    Drift(#[from] DriftError),

    #[error("Fairness evaluation failed: {0}")]
    Fairness(#[from] FairnessError),

    #[error("Governance evaluation failed: {0}")]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl VigilErrorCode for SimulationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => error_code::MODEL_NOT_FOUND,
            Self::AlreadySimulated { .. } => error_code::ALREADY_SIMULATED,
            Self::Drift(e) => e.error_code(),
            Self::Fairness(e) => e.error_code(),
            Self::Governance(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
