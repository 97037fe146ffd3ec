//! Error handling for Vigil.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod drift_error;
pub mod error_code;
pub mod fairness_error;
pub mod governance_error;
pub mod monitor_error;
pub mod simulation_error;
pub mod storage_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use drift_error::DriftError;
pub use error_code::VigilErrorCode;
pub use fairness_error::FairnessError;
pub use governance_error::GovernanceError;
pub use monitor_error::{MonitorError, MonitorResult};
pub use simulation_error::SimulationError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;
