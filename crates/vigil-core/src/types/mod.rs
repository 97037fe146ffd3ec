//! Shared domain types.

pub mod features;
pub mod status;

pub use features::{numeric_value, FeatureMap};
pub use status::{DeploymentStatus, GovernanceStatus};
