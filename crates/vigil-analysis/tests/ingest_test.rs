//! Integration tests for prediction log ingestion.

use serde_json::json;
use vigil_analysis::ingest;
use vigil_core::config::{DriftConfig, VigilConfig};
use vigil_core::errors::{MonitorError, ValidationError};
use vigil_core::types::FeatureMap;
use vigil_storage::queries::{drift_metrics, models, prediction_logs, risk_history};
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

fn log(model_id: i64, amount: f64, prediction: f64, ts: i64) -> prediction_logs::NewPredictionLog {
    let mut features = FeatureMap::new();
    features.insert("transaction_amount".into(), json!(amount));
    prediction_logs::NewPredictionLog {
        model_id,
        input_features: features,
        prediction,
        actual_label: None,
        timestamp: ts,
    }
}

#[test]
fn malformed_input_is_rejected_before_any_write() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    let config = VigilConfig::default();

    let mut empty = log(model_id, 100.0, 0.5, 1_000);
    empty.input_features.clear();
    assert!(matches!(
        ingest::ingest_log(&mut db, &config, &empty),
        Err(MonitorError::Validation(ValidationError::EmptyFeatures))
    ));

    let nan = log(model_id, 100.0, f64::NAN, 1_000);
    assert!(matches!(
        ingest::ingest_log(&mut db, &config, &nan),
        Err(MonitorError::Validation(ValidationError::NonFinitePrediction { .. }))
    ));

    let mut bad_label = log(model_id, 100.0, 0.5, 1_000);
    bad_label.actual_label = Some(f64::INFINITY);
    assert!(matches!(
        ingest::ingest_log(&mut db, &config, &bad_label),
        Err(MonitorError::Validation(ValidationError::NonFiniteLabel { .. }))
    ));

    assert_eq!(prediction_logs::count_logs(db.conn(), model_id).unwrap(), 0);
}

#[test]
fn one_bad_record_sinks_the_whole_batch() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);

    let mut batch: Vec<_> = (0..30).map(|i| log(model_id, 100.0, 0.3, i)).collect();
    batch[17].prediction = f64::NAN;

    let result = ingest::ingest_batch(&mut db, &VigilConfig::default(), model_id, &batch);
    assert!(matches!(result, Err(MonitorError::Validation(_))));
    assert_eq!(prediction_logs::count_logs(db.conn(), model_id).unwrap(), 0);
}

#[test]
fn batch_records_must_reference_the_declared_model() {
    let mut db = Database::open_in_memory().unwrap();
    let model_a = test_model(&db);
    let model_b = models::insert_model(
        db.conn(),
        &models::NewModel {
            model_name: "loan-scorer".into(),
            version: "1.0.0".into(),
            description: None,
            training_accuracy: None,
        },
    )
    .unwrap();

    // Records carry model B but the batch is declared for model A.
    let batch: Vec<_> = (0..3).map(|i| log(model_b, 100.0, 0.3, i)).collect();
    let result = ingest::ingest_batch(&mut db, &VigilConfig::default(), model_a, &batch);
    assert!(matches!(
        result,
        Err(MonitorError::Validation(
            ValidationError::BatchModelMismatch { expected, found }
        )) if expected == model_a && found == model_b
    ));

    // Nothing may land under either model.
    assert_eq!(prediction_logs::count_logs(db.conn(), model_a).unwrap(), 0);
    assert_eq!(prediction_logs::count_logs(db.conn(), model_b).unwrap(), 0);
}

#[test]
fn valid_logs_land_and_unknown_models_do_not() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    let config = VigilConfig::default();

    let id = ingest::ingest_log(&mut db, &config, &log(model_id, 250.0, 0.7, 1_000)).unwrap();
    assert!(id > 0);
    assert_eq!(prediction_logs::count_logs(db.conn(), model_id).unwrap(), 1);

    let result = ingest::ingest_log(&mut db, &config, &log(model_id + 9, 250.0, 0.7, 1_000));
    assert!(matches!(result, Err(MonitorError::Storage(_))));
}

#[test]
fn auto_evaluate_fires_once_both_windows_are_filled() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    let config = VigilConfig {
        drift: DriftConfig {
            baseline_window: Some(10),
            recent_window: Some(10),
            ..Default::default()
        },
        auto_evaluate: Some(true),
        ..Default::default()
    };

    let first_half: Vec<_> = (0..10).map(|i| log(model_id, 100.0 + i as f64, 0.2, i)).collect();
    ingest::ingest_batch(&mut db, &config, model_id, &first_half).unwrap();
    // Below the combined window: nothing evaluated yet.
    assert_eq!(drift_metrics::count_for_model(db.conn(), model_id).unwrap(), 0);

    let second_half: Vec<_> = (0..10)
        .map(|i| log(model_id, 900.0 + i as f64, 0.9, 100 + i))
        .collect();
    ingest::ingest_batch(&mut db, &config, model_id, &second_half).unwrap();

    assert!(drift_metrics::count_for_model(db.conn(), model_id).unwrap() > 0);
    assert_eq!(risk_history::count_for_model(db.conn(), model_id).unwrap(), 1);

    let latest = risk_history::latest(db.conn(), model_id).unwrap().unwrap();
    assert!(latest.risk_score > 0.0, "disjoint windows must raise risk");
}

#[test]
fn auto_evaluate_stays_off_by_default() {
    let mut db = Database::open_in_memory().unwrap();
    let model_id = test_model(&db);
    let config = VigilConfig {
        drift: DriftConfig {
            baseline_window: Some(5),
            recent_window: Some(5),
            ..Default::default()
        },
        ..Default::default()
    };

    let batch: Vec<_> = (0..20).map(|i| log(model_id, 100.0, 0.3, i)).collect();
    ingest::ingest_batch(&mut db, &config, model_id, &batch).unwrap();
    assert_eq!(drift_metrics::count_for_model(db.conn(), model_id).unwrap(), 0);
    assert_eq!(risk_history::count_for_model(db.conn(), model_id).unwrap(), 0);
}
