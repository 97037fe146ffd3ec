//! Drift detection errors.

use super::error_code::{self, VigilErrorCode};
use super::storage_error::StorageError;

/// Errors that can occur during drift evaluation.
#[derive(Debug, thiserror::Error)]
pub enum DriftError {
    #[error("Insufficient data: {required} prediction logs required, found {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("No numeric features available for drift evaluation")]
    NoNumericFeatures,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl VigilErrorCode for DriftError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            Self::NoNumericFeatures => error_code::DRIFT_ERROR,
            Self::Storage(e) => e.error_code(),
        }
    }
}
