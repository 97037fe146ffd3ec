//! Input validation errors. Rejected before any write.

use super::error_code::{self, VigilErrorCode};

/// Malformed input detected before persistence.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("input_features must not be empty")]
    EmptyFeatures,

    #[error("Prediction must be a finite number, got {value}")]
    NonFinitePrediction { value: f64 },

    #[error("Actual label must be a finite number, got {value}")]
    NonFiniteLabel { value: f64 },

    #[error("Log references model {found} but the batch is for model {expected}")]
    BatchModelMismatch { expected: i64, found: i64 },

    #[error("Model name must not be empty")]
    EmptyModelName,

    #[error("Policy name must not be empty")]
    EmptyPolicyName,

    #[error("Policy '{field}' must be in [{min}, {max}], got {value}")]
    ThresholdOutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl VigilErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
