//! Model Risk Index composition.

pub mod composer;

pub use composer::{compose_components, compose_risk, RiskBreakdown};
