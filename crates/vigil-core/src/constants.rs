//! Shared constants for the Vigil model-risk engine.

/// Vigil version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default baseline window: earliest N prediction logs.
pub const DEFAULT_BASELINE_WINDOW: usize = 100;

/// Default recent window: most recent M prediction logs.
pub const DEFAULT_RECENT_WINDOW: usize = 100;

/// Number of fixed histogram bins for PSI.
pub const PSI_BIN_COUNT: usize = 10;

/// Floor applied to per-bin frequency shares before the log ratio.
pub const PSI_FREQUENCY_FLOOR: f64 = 1e-4;

/// PSI at or above this value flags drift.
pub const DEFAULT_PSI_THRESHOLD: f64 = 0.25;

/// KS statistic at or above this value flags drift.
pub const DEFAULT_KS_THRESHOLD: f64 = 0.20;

/// Prediction scores above this value count as positive outcomes.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Disparity above this value flags unfairness when no policy is active.
pub const DEFAULT_DISPARITY_THRESHOLD: f64 = 0.10;

/// PSI weight in the drift component (values expected in [0, 1+]).
pub const DRIFT_PSI_WEIGHT: f64 = 60.0;

/// KS weight in the drift component.
pub const DRIFT_KS_WEIGHT: f64 = 40.0;

/// Drift share of the Model Risk Index.
pub const MRI_DRIFT_SHARE: f64 = 0.6;

/// Fairness share of the Model Risk Index.
pub const MRI_FAIRNESS_SHARE: f64 = 0.4;

/// Baseline sample count for the simulation orchestrator.
pub const SIM_BASELINE_SAMPLES: usize = 300;

/// Shifted sample count for the simulation orchestrator.
pub const SIM_SHIFTED_SAMPLES: usize = 200;

/// Back-dating span in days for the staged risk trajectory.
pub const SIM_TRAJECTORY_DAYS: [i64; 4] = [30, 20, 10, 0];
