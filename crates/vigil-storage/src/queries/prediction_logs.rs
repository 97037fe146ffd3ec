//! prediction_logs queries. Append-only; batch inserts are atomic.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;
use vigil_core::types::FeatureMap;

/// A prediction log row.
#[derive(Debug, Clone)]
pub struct PredictionLogRecord {
    pub id: i64,
    pub model_id: i64,
    pub input_features: FeatureMap,
    pub prediction: f64,
    pub actual_label: Option<f64>,
    pub timestamp: i64,
}

/// Fields for one new prediction log.
#[derive(Debug, Clone)]
pub struct NewPredictionLog {
    pub model_id: i64,
    pub input_features: FeatureMap,
    pub prediction: f64,
    pub actual_label: Option<f64>,
    pub timestamp: i64,
}

fn row_to_log(row: &rusqlite::Row<'_>) -> rusqlite::Result<PredictionLogRecord> {
    let features_json: String = row.get(2)?;
    let input_features: FeatureMap = serde_json::from_str(&features_json).unwrap_or_default();
    Ok(PredictionLogRecord {
        id: row.get(0)?,
        model_id: row.get(1)?,
        input_features,
        prediction: row.get(3)?,
        actual_label: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

fn serialize_features(features: &FeatureMap) -> Result<String, StorageError> {
    serde_json::to_string(features).map_err(|e| StorageError::SqliteError {
        message: format!("failed to serialize input_features: {e}"),
    })
}

/// Insert a single prediction log. Returns its id.
pub fn insert_log(conn: &Connection, log: &NewPredictionLog) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO prediction_logs
             (model_id, input_features, prediction, actual_label, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .map_err(StorageError::from)?
    .execute(params![
        log.model_id,
        serialize_features(&log.input_features)?,
        log.prediction,
        log.actual_label,
        log.timestamp,
    ])
    .map_err(StorageError::from)?;
    Ok(conn.last_insert_rowid())
}

/// Insert a batch of prediction logs inside one transaction.
///
/// All-or-nothing: any failure rolls the whole batch back and no
/// partial logs survive. Returns the number of rows inserted.
pub fn insert_batch(
    conn: &mut Connection,
    logs: &[NewPredictionLog],
) -> Result<usize, StorageError> {
    let tx = conn.transaction().map_err(StorageError::from)?;
    let mut inserted = 0usize;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO prediction_logs
                     (model_id, input_features, prediction, actual_label, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(StorageError::from)?;
        for log in logs {
            stmt.execute(params![
                log.model_id,
                serialize_features(&log.input_features)?,
                log.prediction,
                log.actual_label,
                log.timestamp,
            ])
            .map_err(|e| {
                tracing::error!(
                    model_id = log.model_id,
                    inserted,
                    error = %e,
                    "prediction batch insert failed; rolling back"
                );
                StorageError::from(e)
            })?;
            inserted += 1;
        }
    }
    tx.commit().map_err(StorageError::from)?;
    Ok(inserted)
}

/// Load a model's full log history, oldest first.
pub fn load_ordered(
    conn: &Connection,
    model_id: i64,
) -> Result<Vec<PredictionLogRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, model_id, input_features, prediction, actual_label, timestamp
             FROM prediction_logs
             WHERE model_id = ?1
             ORDER BY timestamp ASC, id ASC",
        )
        .map_err(StorageError::from)?;

    let rows = stmt
        .query_map(params![model_id], row_to_log)
        .map_err(StorageError::from)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::from)?);
    }
    Ok(result)
}

/// Count logs for a model.
pub fn count_logs(conn: &Connection, model_id: i64) -> Result<i64, StorageError> {
    conn.prepare_cached("SELECT COUNT(*) FROM prediction_logs WHERE model_id = ?1")
        .map_err(StorageError::from)?
        .query_row(params![model_id], |row| row.get(0))
        .map_err(StorageError::from)
}

/// Feature names from the earliest log, used to decide which features
/// to monitor.
pub fn sample_feature_names(
    conn: &Connection,
    model_id: i64,
) -> Result<Vec<String>, StorageError> {
    let sample: Option<String> = conn
        .prepare_cached(
            "SELECT input_features FROM prediction_logs
             WHERE model_id = ?1 ORDER BY timestamp ASC, id ASC LIMIT 1",
        )
        .map_err(StorageError::from)?
        .query_row(params![model_id], |row| row.get(0))
        .optional()
        .map_err(StorageError::from)?;

    let Some(json) = sample else {
        return Ok(Vec::new());
    };
    let features: FeatureMap = serde_json::from_str(&json).unwrap_or_default();
    Ok(features.into_keys().collect())
}

/// Delete all logs for a model. Returns the number of rows removed.
pub fn delete_for_model(conn: &Connection, model_id: i64) -> Result<i64, StorageError> {
    let deleted = conn
        .execute(
            "DELETE FROM prediction_logs WHERE model_id = ?1",
            params![model_id],
        )
        .map_err(StorageError::from)?;
    Ok(deleted as i64)
}
