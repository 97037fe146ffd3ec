//! The Vigil engine.
//!
//! Prediction logs feed drift and fairness metrics, which compose into
//! the Model Risk Index; governance evaluates that index against the
//! active policy and gates deployment. The simulation orchestrator
//! rehearses the same pipeline end-to-end under strict idempotency and
//! per-step atomicity.

pub mod drift;
pub mod fairness;
pub mod governance;
pub mod ingest;
pub mod locks;
pub mod registry;
pub mod risk;
pub mod simulation;
