//! Query modules for each domain table.

pub mod audit;
pub mod drift_metrics;
pub mod fairness_metrics;
pub mod models;
pub mod policies;
pub mod prediction_logs;
pub mod risk_history;
pub mod util;
