//! Fairness evaluation configuration.

use crate::constants;
use serde::{Deserialize, Serialize};

/// Configuration for the fairness subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FairnessConfig {
    /// Prediction scores above this count as positive outcomes. Default: 0.5.
    pub decision_threshold: Option<f64>,
    /// Disparity threshold when no policy is active. Default: 0.10.
    /// The active policy's max_allowed_disparity overrides this.
    pub disparity_threshold: Option<f64>,
}

impl FairnessConfig {
    pub fn effective_decision_threshold(&self) -> f64 {
        self.decision_threshold
            .unwrap_or(constants::DEFAULT_DECISION_THRESHOLD)
    }

    pub fn effective_disparity_threshold(&self) -> f64 {
        self.disparity_threshold
            .unwrap_or(constants::DEFAULT_DISPARITY_THRESHOLD)
    }
}
