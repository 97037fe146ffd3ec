//! Top-level monitoring pipeline error.

use super::config_error::ConfigError;
use super::drift_error::DriftError;
use super::error_code::VigilErrorCode;
use super::fairness_error::FairnessError;
use super::governance_error::GovernanceError;
use super::simulation_error::SimulationError;
use super::storage_error::StorageError;
use super::validation_error::ValidationError;

/// Result alias for pipeline-level operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Umbrella error for the full monitoring pipeline.
/// Subsystem errors convert in via `From`.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Drift(#[from] DriftError),

    #[error(transparent)]
    Fairness(#[from] FairnessError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl VigilErrorCode for MonitorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Drift(e) => e.error_code(),
            Self::Fairness(e) => e.error_code(),
            Self::Governance(e) => e.error_code(),
            Self::Simulation(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
