//! Governance and deployment status enums.
//!
//! Closed tagged variants rather than free-form strings, so illegal
//! states are unrepresentable in the registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Governance status of a registered model.
///
/// `Draft` transitions to `Approved`, `AtRisk`, or `Blocked` via
/// governance evaluation; deployment never changes this status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceStatus {
    Draft,
    Approved,
    AtRisk,
    Blocked,
}

impl GovernanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::AtRisk => "at_risk",
            Self::Blocked => "blocked",
        }
    }

    /// Parse a stored status string. Unknown values map to `Draft`,
    /// which fails closed at the deployment gate only after an
    /// evaluation has run.
    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "at_risk" => Self::AtRisk,
            "blocked" => Self::Blocked,
            _ => Self::Draft,
        }
    }
}

impl fmt::Display for GovernanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment status of a registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Draft,
    Deployed,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Deployed => "deployed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "deployed" => Self::Deployed,
            _ => Self::Draft,
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
