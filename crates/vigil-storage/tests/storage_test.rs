//! Integration tests for the Vigil storage layer.

use serde_json::json;
use vigil_core::errors::StorageError;
use vigil_core::types::{DeploymentStatus, FeatureMap, GovernanceStatus};
use vigil_storage::queries::{
    drift_metrics, fairness_metrics, models, policies, prediction_logs, risk_history,
};
use vigil_storage::{connection::pragmas, migrations, Database};

fn test_model(db: &Database) -> i64 {
    models::insert_model(
        db.conn(),
        &models::NewModel {
            model_name: "fraud-detector".into(),
            version: "1.0.0".into(),
            description: Some("test model".into()),
            training_accuracy: Some(0.93),
        },
    )
    .unwrap()
}

fn log_for(model_id: i64, amount: f64, prediction: f64, timestamp: i64) -> prediction_logs::NewPredictionLog {
    let mut features = FeatureMap::new();
    features.insert("transaction_amount".into(), json!(amount));
    prediction_logs::NewPredictionLog {
        model_id,
        input_features: features,
        prediction,
        actual_label: None,
        timestamp,
    }
}

#[test]
fn migrations_reach_latest_version_and_enforce_foreign_keys() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(migrations::current_version(db.conn()).unwrap(), 3);
    assert!(pragmas::verify_foreign_keys(db.conn()).unwrap());
}

#[test]
fn open_on_disk_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vigil.db");
    {
        let db = Database::open(&path).unwrap();
        test_model(&db);
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(migrations::current_version(db.conn()).unwrap(), 3);
    assert_eq!(models::list_models(db.conn()).unwrap().len(), 1);
}

#[test]
fn new_models_start_in_draft() {
    let db = Database::open_in_memory().unwrap();
    let id = test_model(&db);
    let model = models::get_model(db.conn(), id).unwrap().unwrap();
    assert_eq!(model.status, GovernanceStatus::Draft);
    assert_eq!(model.deployment_status, DeploymentStatus::Draft);
}

#[test]
fn batch_insert_is_all_or_nothing() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);

    // Record 250 of 500 references a model that does not exist; the FK
    // violation must roll the entire batch back.
    let mut batch: Vec<_> = (0..500)
        .map(|i| log_for(model_id, 200.0, 0.3, 1_000 + i))
        .collect();
    batch[250].model_id = model_id + 999;

    let result = prediction_logs::insert_batch(db.conn_mut(), &batch);
    assert!(matches!(
        result,
        Err(StorageError::ConstraintViolation { .. })
    ));
    assert_eq!(prediction_logs::count_logs(db.conn(), model_id).unwrap(), 0);
}

#[test]
fn batch_insert_commits_and_preserves_order() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);

    let batch: Vec<_> = (0..50)
        .map(|i| log_for(model_id, 100.0 + i as f64, 0.4, 1_000 + i))
        .collect();
    assert_eq!(
        prediction_logs::insert_batch(db.conn_mut(), &batch).unwrap(),
        50
    );

    let loaded = prediction_logs::load_ordered(db.conn(), model_id).unwrap();
    assert_eq!(loaded.len(), 50);
    assert!(loaded.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(
        loaded[0].input_features["transaction_amount"],
        json!(100.0)
    );
}

#[test]
fn metric_rows_require_an_existing_model() {
    let mut db = Database::open_in_memory().unwrap();
    let metric = drift_metrics::NewDriftMetric {
        model_id: 42,
        feature_name: "transaction_amount".into(),
        psi_value: 0.3,
        ks_statistic: 0.2,
        drift_flag: true,
        timestamp: 1_000,
    };
    let result = drift_metrics::insert_batch(db.conn_mut(), std::slice::from_ref(&metric));
    assert!(matches!(
        result,
        Err(StorageError::ConstraintViolation { .. })
    ));
}

#[test]
fn latest_per_feature_ignores_superseded_rows() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);

    let run = |psi: f64, ts: i64| {
        vec![
            drift_metrics::NewDriftMetric {
                model_id,
                feature_name: "transaction_amount".into(),
                psi_value: psi,
                ks_statistic: 0.1,
                drift_flag: false,
                timestamp: ts,
            },
            drift_metrics::NewDriftMetric {
                model_id,
                feature_name: "prediction".into(),
                psi_value: psi / 2.0,
                ks_statistic: 0.05,
                drift_flag: false,
                timestamp: ts,
            },
        ]
    };
    drift_metrics::insert_batch(db.conn_mut(), &run(0.10, 1_000)).unwrap();
    drift_metrics::insert_batch(db.conn_mut(), &run(0.40, 2_000)).unwrap();

    let latest = drift_metrics::latest_per_feature(db.conn(), model_id).unwrap();
    assert_eq!(latest.len(), 2);
    for metric in &latest {
        assert_eq!(metric.timestamp, 2_000);
    }
    assert_eq!(drift_metrics::count_for_model(db.conn(), model_id).unwrap(), 4);
}

#[test]
fn duplicate_policy_names_are_rejected() {
    let db = Database::open_in_memory().unwrap();
    let policy = policies::NewPolicy {
        name: "default".into(),
        max_allowed_mri: 80.0,
        max_allowed_disparity: 0.25,
        approval_required_above_mri: 60.0,
    };
    policies::insert_policy(db.conn(), &policy).unwrap();
    let result = policies::insert_policy(db.conn(), &policy);
    assert!(matches!(
        result,
        Err(StorageError::ConstraintViolation { .. })
    ));
}

#[test]
fn activation_swaps_the_single_active_policy() {
    let mut db = Database::open_in_memory().unwrap();
    let a = policies::insert_policy(
        db.conn(),
        &policies::NewPolicy {
            name: "strict".into(),
            max_allowed_mri: 60.0,
            max_allowed_disparity: 0.10,
            approval_required_above_mri: 40.0,
        },
    )
    .unwrap();
    let b = policies::insert_policy(
        db.conn(),
        &policies::NewPolicy {
            name: "lenient".into(),
            max_allowed_mri: 90.0,
            max_allowed_disparity: 0.40,
            approval_required_above_mri: 80.0,
        },
    )
    .unwrap();

    policies::activate_policy(db.conn_mut(), a).unwrap();
    assert_eq!(policies::active_policy(db.conn()).unwrap().unwrap().id, a);

    policies::activate_policy(db.conn_mut(), b).unwrap();
    let active = policies::active_policy(db.conn()).unwrap().unwrap();
    assert_eq!(active.id, b);
    assert_eq!(
        policies::list_policies(db.conn(), true).unwrap().len(),
        1,
        "exactly one active policy after swap"
    );
}

#[test]
fn activating_a_missing_policy_rolls_back() {
    let mut db = Database::open_in_memory().unwrap();
    let a = policies::insert_policy(
        db.conn(),
        &policies::NewPolicy {
            name: "only".into(),
            max_allowed_mri: 80.0,
            max_allowed_disparity: 0.25,
            approval_required_above_mri: 60.0,
        },
    )
    .unwrap();
    policies::activate_policy(db.conn_mut(), a).unwrap();

    let result = policies::activate_policy(db.conn_mut(), a + 50);
    assert!(matches!(result, Err(StorageError::RowNotFound { .. })));
    // The failed activation must not have deactivated the incumbent.
    assert_eq!(policies::active_policy(db.conn()).unwrap().unwrap().id, a);
}

#[test]
fn fairness_latest_evaluation_returns_one_run() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);

    let run = |disparity: f64, ts: i64| {
        ["Male", "Female"]
            .iter()
            .map(|group| fairness_metrics::NewFairnessMetric {
                model_id,
                protected_attribute: "gender".into(),
                group_name: group.to_string(),
                total_predictions: 100,
                positive_predictions: 60,
                approval_rate: 0.6,
                disparity_score: disparity,
                fairness_flag: disparity > 0.1,
                timestamp: ts,
            })
            .collect::<Vec<_>>()
    };
    fairness_metrics::insert_batch(db.conn_mut(), &run(0.05, 1_000)).unwrap();
    fairness_metrics::insert_batch(db.conn_mut(), &run(0.32, 2_000)).unwrap();

    let latest = fairness_metrics::latest_evaluation(db.conn(), model_id).unwrap();
    assert_eq!(latest.len(), 2);
    assert!(latest.iter().all(|m| (m.disparity_score - 0.32).abs() < 1e-9));

    let single = fairness_metrics::latest(db.conn(), model_id).unwrap().unwrap();
    assert!((single.disparity_score - 0.32).abs() < 1e-9);
}

#[test]
fn risk_history_latest_is_newest_by_timestamp() {
    let db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);

    for (score, ts) in [(45.0, 1_000), (60.0, 2_000), (72.0, 3_000)] {
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

    let latest = risk_history::latest(db.conn(), model_id).unwrap().unwrap();
    assert!((latest.risk_score - 72.0).abs() < 1e-9);
    assert_eq!(risk_history::history(db.conn(), model_id, 2).unwrap().len(), 2);
}
