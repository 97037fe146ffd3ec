//! Drift detection configuration.

use crate::constants;
use serde::{Deserialize, Serialize};

/// Configuration for the drift detection subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DriftConfig {
    /// Baseline window: earliest N logs. Default: 100.
    pub baseline_window: Option<usize>,
    /// Recent window: most recent M logs. Default: 100.
    pub recent_window: Option<usize>,
    /// PSI threshold for the drift flag. Default: 0.25.
    pub psi_threshold: Option<f64>,
    /// KS threshold for the drift flag. Default: 0.20.
    pub ks_threshold: Option<f64>,
}

impl DriftConfig {
    pub fn effective_baseline_window(&self) -> usize {
        self.baseline_window
            .unwrap_or(constants::DEFAULT_BASELINE_WINDOW)
    }

    pub fn effective_recent_window(&self) -> usize {
        self.recent_window
            .unwrap_or(constants::DEFAULT_RECENT_WINDOW)
    }

    pub fn effective_psi_threshold(&self) -> f64 {
        self.psi_threshold
            .unwrap_or(constants::DEFAULT_PSI_THRESHOLD)
    }

    pub fn effective_ks_threshold(&self) -> f64 {
        self.ks_threshold.unwrap_or(constants::DEFAULT_KS_THRESHOLD)
    }
}
