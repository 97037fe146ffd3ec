//! Integration tests for governance evaluation, policy administration,
//! and the deployment gate.

use vigil_analysis::governance::{self, DeployRequest};
use vigil_core::errors::{GovernanceError, MonitorError, ValidationError};
use vigil_core::types::{DeploymentStatus, GovernanceStatus};
use vigil_storage::queries::policies::{NewPolicy, PolicyRecord};
use vigil_storage::queries::{audit, fairness_metrics, models, policies, risk_history};
use vigil_storage::Database;

fn test_model(db: &Database) -> i64 {
    models::insert_model(
        db.conn(),
        &models::NewModel {
            model_name: "fraud-detector".into(),
            version: "1.0.0".into(),
            description: None,
            training_accuracy: None,
        },
    )
    .unwrap()
}

fn standard_policy() -> NewPolicy {
    NewPolicy {
        name: "standard".into(),
        max_allowed_mri: 80.0,
        max_allowed_disparity: 0.25,
        approval_required_above_mri: 60.0,
    }
}

fn activate(db: &mut Database, policy: &NewPolicy) -> i64 {
    let id = policies::insert_policy(db.conn(), policy).unwrap();
    policies::activate_policy(db.conn_mut(), id).unwrap();
    id
}

fn set_risk(db: &Database, model_id: i64, score: f64, ts: i64) {
    risk_history::insert_entry(
        db.conn(),
        &risk_history::NewRiskEntry {
            model_id,
            risk_score: score,
            drift_component: score,
            fairness_component: 0.0,
            timestamp: ts,
        },
    )
    .unwrap();
}

fn set_disparity(db: &mut Database, model_id: i64, disparity: f64, ts: i64) {
    fairness_metrics::insert_batch(
        db.conn_mut(),
        &[fairness_metrics::NewFairnessMetric {
            model_id,
            protected_attribute: "gender".into(),
            group_name: "Male".into(),
            total_predictions: 10,
            positive_predictions: 5,
            approval_rate: 0.5,
            disparity_score: disparity,
            fairness_flag: false,
            timestamp: ts,
        }],
    )
    .unwrap();
}

fn policy_record(policy: &NewPolicy) -> PolicyRecord {
    PolicyRecord {
        id: 1,
        name: policy.name.clone(),
        max_allowed_mri: policy.max_allowed_mri,
        max_allowed_disparity: policy.max_allowed_disparity,
        approval_required_above_mri: policy.approval_required_above_mri,
        active: true,
        created_at: 0,
    }
}

#[test]
fn rules_fire_in_priority_order() {
    let policy = policy_record(&standard_policy());

    // Rule 1: hard risk ceiling wins even with a disparity breach.
    let decision = governance::decide(85.0, 0.9, &policy);
    assert_eq!(decision.status, GovernanceStatus::Blocked);

    // Rule 2: disparity ceiling.
    let decision = governance::decide(40.0, 0.30, &policy);
    assert_eq!(decision.status, GovernanceStatus::AtRisk);

    // Rule 3: the approval band between 60 and 80.
    let decision = governance::decide(70.0, 0.10, &policy);
    assert_eq!(decision.status, GovernanceStatus::AtRisk);

    // Otherwise approved.
    let decision = governance::decide(30.0, 0.05, &policy);
    assert_eq!(decision.status, GovernanceStatus::Approved);
}

#[test]
fn decisions_are_deterministic() {
    let policy = policy_record(&standard_policy());
    let first = governance::decide(63.8, 0.32, &policy);
    let second = governance::decide(63.8, 0.32, &policy);
    assert_eq!(first, second);
}

#[test]
fn boundary_values_do_not_trip_strict_thresholds() {
    let policy = policy_record(&standard_policy());
    // Exactly at a ceiling is still inside it.
    assert_eq!(governance::decide(80.0, 0.25, &policy).status, GovernanceStatus::AtRisk);
    assert_eq!(governance::decide(60.0, 0.25, &policy).status, GovernanceStatus::Approved);
}

#[test]
fn evaluation_fails_closed_without_an_active_policy() {
    let db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    set_risk(&db, model_id, 95.0, 1_000);

    let result = governance::evaluate_governance(&db, model_id);
    assert!(matches!(result, Err(GovernanceError::NoActivePolicy)));

    // The stored status must not have moved.
    let model = models::get_model(db.conn(), model_id).unwrap().unwrap();
    assert_eq!(model.status, GovernanceStatus::Draft);
}

#[test]
fn evaluation_persists_status_and_audits() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    activate(&mut db, &standard_policy());
    set_risk(&db, model_id, 63.8, 1_000);
    set_disparity(&mut db, model_id, 0.32, 1_000);

    let outcome = governance::evaluate_governance(&db, model_id).unwrap();
    assert_eq!(outcome.status, GovernanceStatus::AtRisk);
    assert!((outcome.risk_score - 63.8).abs() < 1e-9);

    let model = models::get_model(db.conn(), model_id).unwrap().unwrap();
    assert_eq!(model.status, GovernanceStatus::AtRisk);

    let entries = audit::recent_entries(db.conn(), 5).unwrap();
    assert!(entries
        .iter()
        .any(|e| e.action == "governance_evaluation" && e.model_id == Some(model_id)));
}

#[test]
fn swapping_the_active_policy_changes_the_next_verdict() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    set_risk(&db, model_id, 70.0, 1_000);

    activate(&mut db, &standard_policy());
    assert_eq!(
        governance::evaluate_governance(&db, model_id).unwrap().status,
        GovernanceStatus::AtRisk
    );

    let lenient = policies::insert_policy(
        db.conn(),
        &NewPolicy {
            name: "lenient".into(),
            max_allowed_mri: 95.0,
            max_allowed_disparity: 0.50,
            approval_required_above_mri: 90.0,
        },
    )
    .unwrap();
    policies::activate_policy(db.conn_mut(), lenient).unwrap();

    assert_eq!(
        governance::evaluate_governance(&db, model_id).unwrap().status,
        GovernanceStatus::Approved
    );
}

#[test]
fn blocked_models_never_deploy() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    activate(&mut db, &standard_policy());
    set_risk(&db, model_id, 95.0, 1_000);

    let request = DeployRequest {
        override_at_risk: true,
        justification: Some("urgent launch".into()),
    };
    let result = governance::deploy_model(&db, model_id, &request);
    assert!(matches!(result, Err(GovernanceError::DeploymentBlocked { .. })));

    let model = models::get_model(db.conn(), model_id).unwrap().unwrap();
    assert_eq!(model.deployment_status, DeploymentStatus::Draft);
}

#[test]
fn at_risk_deployment_needs_override_and_justification() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    activate(&mut db, &standard_policy());
    set_risk(&db, model_id, 70.0, 1_000);

    let result = governance::deploy_model(&db, model_id, &DeployRequest::default());
    assert!(matches!(result, Err(GovernanceError::OverrideRequired { .. })));

    let result = governance::deploy_model(
        &db,
        model_id,
        &DeployRequest {
            override_at_risk: true,
            justification: Some("   ".into()),
        },
    );
    assert!(matches!(result, Err(GovernanceError::JustificationRequired)));

    let status = governance::deploy_model(
        &db,
        model_id,
        &DeployRequest {
            override_at_risk: true,
            justification: Some("monitored canary rollout".into()),
        },
    )
    .unwrap();
    assert_eq!(status, DeploymentStatus::Deployed);

    let entries = audit::recent_entries(db.conn(), 10).unwrap();
    let success = entries
        .iter()
        .find(|e| e.action == "deployment" && e.action_status == "success")
        .unwrap();
    assert_eq!(success.override_used, Some(true));
    assert_eq!(
        success.details.as_ref().unwrap()["justification"],
        "monitored canary rollout"
    );
}

#[test]
fn approved_models_deploy_without_override() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    activate(&mut db, &standard_policy());
    set_risk(&db, model_id, 20.0, 1_000);

    let status = governance::deploy_model(&db, model_id, &DeployRequest::default()).unwrap();
    assert_eq!(status, DeploymentStatus::Deployed);

    let model = models::get_model(db.conn(), model_id).unwrap().unwrap();
    assert_eq!(model.status, GovernanceStatus::Approved);
    assert_eq!(model.deployment_status, DeploymentStatus::Deployed);
}

#[test]
fn policy_creation_validates_thresholds() {
    let db = Database::open_in_memory().unwrap();

    let mut bad = standard_policy();
    bad.max_allowed_disparity = 1.5;
    let result = governance::create_policy(&db, &bad);
    assert!(matches!(
        result,
        Err(MonitorError::Validation(
            ValidationError::ThresholdOutOfRange { field: "max_allowed_disparity", .. }
        ))
    ));

    let created = governance::create_policy(&db, &standard_policy()).unwrap();
    assert!(!created.active, "new policies start inactive");

    let duplicate = governance::create_policy(&db, &standard_policy());
    assert!(matches!(
        duplicate,
        Err(MonitorError::Governance(GovernanceError::DuplicatePolicy { .. }))
    ));
}

#[test]
fn policy_updates_apply_only_named_fields() {
    let db = Database::open_in_memory().unwrap();
    let created = governance::create_policy(&db, &standard_policy()).unwrap();

    let updated = governance::update_policy_thresholds(
        &db,
        created.id,
        &governance::PolicyUpdate {
            max_allowed_mri: Some(70.0),
            ..Default::default()
        },
    )
    .unwrap();
    assert!((updated.max_allowed_mri - 70.0).abs() < 1e-9);
    assert!((updated.max_allowed_disparity - 0.25).abs() < 1e-9);

    let missing = governance::update_policy_thresholds(
        &db,
        created.id + 10,
        &governance::PolicyUpdate::default(),
    );
    assert!(matches!(
        missing,
        Err(MonitorError::Governance(GovernanceError::PolicyNotFound { .. }))
    ));
}
