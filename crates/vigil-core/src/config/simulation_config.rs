//! Simulation orchestrator configuration.

use crate::constants;
use serde::{Deserialize, Serialize};

/// Configuration for the simulation subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Baseline batch size. Default: 300.
    pub baseline_samples: Option<usize>,
    /// Shifted batch size. Default: 200.
    pub shifted_samples: Option<usize>,
    /// Deterministic generator seed. Default: 0 (fixed, reproducible).
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn effective_baseline_samples(&self) -> usize {
        self.baseline_samples
            .unwrap_or(constants::SIM_BASELINE_SAMPLES)
    }

    pub fn effective_shifted_samples(&self) -> usize {
        self.shifted_samples
            .unwrap_or(constants::SIM_SHIFTED_SAMPLES)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(0)
    }
}
