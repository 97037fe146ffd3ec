//! Distribution drift detection.
//!
//! Compares a baseline window (earliest N logs) against a recent
//! window (most recent M logs) per numeric feature, producing PSI and
//! KS statistics plus a drift flag for each.

pub mod detector;
pub mod ks;
pub mod psi;

pub use detector::{run_drift_evaluation, DriftOutcome};
pub use ks::ks_statistic;
pub use psi::population_stability_index;
