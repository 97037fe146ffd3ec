//! Core types, errors, configuration, constants, and tracing for Vigil.
//!
//! Vigil monitors deployed predictive models for distributional drift and
//! demographic disparity, composes both into a Model Risk Index, and gates
//! deployment against governance policy thresholds.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
