//! Fairness evaluation errors.

use super::error_code::{self, VigilErrorCode};
use super::storage_error::StorageError;

/// Errors that can occur during fairness evaluation.
#[derive(Debug, thiserror::Error)]
pub enum FairnessError {
    #[error("Insufficient groups: disparity requires at least 2, found {found}")]
    InsufficientGroups { found: usize },

    #[error("Protected attribute '{attribute}' not present in any prediction log")]
    AttributeMissing { attribute: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl VigilErrorCode for FairnessError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientGroups { .. } => error_code::INSUFFICIENT_DATA,
            Self::AttributeMissing { .. } => error_code::FAIRNESS_ERROR,
            Self::Storage(e) => e.error_code(),
        }
    }
}
