//! Configuration for the Vigil engine.
//!
//! Loaded from `vigil.toml`; every field is optional and falls back to
//! the defaults in `constants.rs` via `effective_*` accessors.

pub mod drift_config;
pub mod fairness_config;
pub mod simulation_config;

pub use drift_config::DriftConfig;
pub use fairness_config::FairnessConfig;
pub use simulation_config::SimulationConfig;

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    pub drift: DriftConfig,
    pub fairness: FairnessConfig,
    pub simulation: SimulationConfig,
    /// Trigger drift + risk recomputation automatically once ingestion
    /// satisfies the combined window. Default: false.
    pub auto_evaluate: Option<bool>,
}

impl VigilConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
            message: e.to_string(),
        })
    }

    /// Load from a file if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn effective_auto_evaluate(&self) -> bool {
        self.auto_evaluate.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = VigilConfig::default();
        assert_eq!(config.drift.effective_baseline_window(), 100);
        assert_eq!(config.drift.effective_recent_window(), 100);
        assert!((config.drift.effective_psi_threshold() - 0.25).abs() < f64::EPSILON);
        assert!((config.fairness.effective_decision_threshold() - 0.5).abs() < f64::EPSILON);
        assert!(!config.effective_auto_evaluate());
    }

    #[test]
    fn load_reads_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(&path, "[simulation]\nseed = 7\n").unwrap();

        let config = VigilConfig::load(&path).unwrap();
        assert_eq!(config.simulation.effective_seed(), 7);

        let missing = VigilConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::FileNotFound { .. })));
        assert!(VigilConfig::load_or_default(&dir.path().join("absent.toml")).is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: VigilConfig = toml::from_str(
            r#"
            auto_evaluate = true

            [drift]
            psi_threshold = 0.3
            "#,
        )
        .unwrap();
        assert!(config.effective_auto_evaluate());
        assert!((config.drift.effective_psi_threshold() - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.drift.effective_ks_threshold(), 0.20);
    }
}
