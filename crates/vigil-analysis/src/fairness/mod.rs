//! Group fairness evaluation.

pub mod evaluator;

pub use evaluator::{run_fairness_evaluation, FairnessOutcome, GroupStats};
