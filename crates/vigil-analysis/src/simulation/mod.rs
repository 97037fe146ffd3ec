//! One-shot lifecycle simulation.
//!
//! Seeds a model with synthetic baseline and shifted prediction
//! batches, runs the full monitoring pipeline over them, and
//! back-dates a staged risk trajectory so history endpoints show a
//! believable degradation curve.

pub mod generator;
pub mod orchestrator;

pub use generator::{RiskProfile, SyntheticRng};
pub use orchestrator::{
    reset_simulation, run_simulation, simulation_status, ResetSummary, SimulationOptions,
    SimulationStatus, SimulationSummary,
};
