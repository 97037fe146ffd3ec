//! Tests for shared domain types.

use vigil_core::types::{DeploymentStatus, GovernanceStatus};

#[test]
fn governance_status_round_trips_through_strings() {
    for status in [
        GovernanceStatus::Draft,
        GovernanceStatus::Approved,
        GovernanceStatus::AtRisk,
        GovernanceStatus::Blocked,
    ] {
        assert_eq!(GovernanceStatus::parse(status.as_str()), status);
    }
}

#[test]
fn unknown_status_strings_fall_back_to_draft() {
    assert_eq!(
        GovernanceStatus::parse("ATTENTION_NEEDED"),
        GovernanceStatus::Draft
    );
    assert_eq!(GovernanceStatus::parse(""), GovernanceStatus::Draft);
}

#[test]
fn deployment_status_round_trips() {
    assert_eq!(
        DeploymentStatus::parse(DeploymentStatus::Deployed.as_str()),
        DeploymentStatus::Deployed
    );
    assert_eq!(DeploymentStatus::parse("draft"), DeploymentStatus::Draft);
}

#[test]
fn status_serializes_snake_case() {
    let json = serde_json::to_string(&GovernanceStatus::AtRisk).unwrap();
    assert_eq!(json, "\"at_risk\"");
}
