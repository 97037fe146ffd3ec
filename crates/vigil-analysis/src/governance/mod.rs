//! Governance: policy decisions, deployment gating, policy admin.

pub mod deployment;
pub mod evaluator;
pub mod policy_admin;

pub use deployment::{deploy_model, DeployRequest};
pub use evaluator::{decide, evaluate_governance, GovernanceDecision, GovernanceOutcome};
pub use policy_admin::{activate_policy, create_policy, update_policy_thresholds, PolicyUpdate};
