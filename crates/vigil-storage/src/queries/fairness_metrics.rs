//! fairness_metrics queries. Append-only; one row per group per run.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;

/// A fairness metric row.
#[derive(Debug, Clone)]
pub struct FairnessMetricRecord {
    pub id: i64,
    pub model_id: i64,
    pub protected_attribute: String,
    pub group_name: String,
    pub total_predictions: i64,
    pub positive_predictions: i64,
    pub approval_rate: f64,
    pub disparity_score: f64,
    pub fairness_flag: bool,
    pub timestamp: i64,
}

/// Fields for one new fairness metric row.
#[derive(Debug, Clone)]
pub struct NewFairnessMetric {
    pub model_id: i64,
    pub protected_attribute: String,
    pub group_name: String,
    pub total_predictions: i64,
    pub positive_predictions: i64,
    pub approval_rate: f64,
    pub disparity_score: f64,
    pub fairness_flag: bool,
    pub timestamp: i64,
}

fn row_to_metric(row: &rusqlite::Row<'_>) -> rusqlite::Result<FairnessMetricRecord> {
    Ok(FairnessMetricRecord {
        id: row.get(0)?,
        model_id: row.get(1)?,
        protected_attribute: row.get(2)?,
        group_name: row.get(3)?,
        total_predictions: row.get(4)?,
        positive_predictions: row.get(5)?,
        approval_rate: row.get(6)?,
        disparity_score: row.get(7)?,
        fairness_flag: row.get::<_, i64>(8)? != 0,
        timestamp: row.get(9)?,
    })
}

const METRIC_COLUMNS: &str = "id, model_id, protected_attribute, group_name,
                              total_predictions, positive_predictions, approval_rate,
                              disparity_score, fairness_flag, timestamp";

/// Insert one evaluation's group rows atomically.
pub fn insert_batch(
    conn: &mut Connection,
    metrics: &[NewFairnessMetric],
) -> Result<usize, StorageError> {
    let tx = conn.transaction().map_err(StorageError::from)?;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO fairness_metrics
                     (model_id, protected_attribute, group_name, total_predictions,
                      positive_predictions, approval_rate, disparity_score,
                      fairness_flag, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(StorageError::from)?;
        for metric in metrics {
            stmt.execute(params![
                metric.model_id,
                metric.protected_attribute,
                metric.group_name,
                metric.total_predictions,
                metric.positive_predictions,
                metric.approval_rate,
                metric.disparity_score,
                metric.fairness_flag as i64,
                metric.timestamp,
            ])
            .map_err(StorageError::from)?;
        }
    }
    tx.commit().map_err(StorageError::from)?;
    Ok(metrics.len())
}

/// The most recent single fairness row; its disparity_score is the
/// evaluation-level value used by risk composition and governance.
pub fn latest(
    conn: &Connection,
    model_id: i64,
) -> Result<Option<FairnessMetricRecord>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {METRIC_COLUMNS} FROM fairness_metrics
         WHERE model_id = ?1
         ORDER BY timestamp DESC, id DESC
         LIMIT 1"
    ))
    .map_err(StorageError::from)?
    .query_row(params![model_id], row_to_metric)
    .optional()
    .map_err(StorageError::from)
}

/// All group rows from the most recent evaluation run.
pub fn latest_evaluation(
    conn: &Connection,
    model_id: i64,
) -> Result<Vec<FairnessMetricRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {METRIC_COLUMNS} FROM fairness_metrics
             WHERE model_id = ?1
               AND timestamp = (
                   SELECT MAX(timestamp) FROM fairness_metrics WHERE model_id = ?1
               )
             ORDER BY group_name"
        ))
        .map_err(StorageError::from)?;

    let rows = stmt
        .query_map(params![model_id], row_to_metric)
        .map_err(StorageError::from)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::from)?);
    }
    Ok(result)
}

/// Metric history for a model, newest first.
pub fn history(
    conn: &Connection,
    model_id: i64,
    limit: i64,
) -> Result<Vec<FairnessMetricRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {METRIC_COLUMNS} FROM fairness_metrics
             WHERE model_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2"
        ))
        .map_err(StorageError::from)?;

    let rows = stmt
        .query_map(params![model_id, limit], row_to_metric)
        .map_err(StorageError::from)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::from)?);
    }
    Ok(result)
}

/// Count metric rows for a model.
pub fn count_for_model(conn: &Connection, model_id: i64) -> Result<i64, StorageError> {
    conn.prepare_cached("SELECT COUNT(*) FROM fairness_metrics WHERE model_id = ?1")
        .map_err(StorageError::from)?
        .query_row(params![model_id], |row| row.get(0))
        .map_err(StorageError::from)
}

/// Delete all metric rows for a model.
pub fn delete_for_model(conn: &Connection, model_id: i64) -> Result<i64, StorageError> {
    let deleted = conn
        .execute(
            "DELETE FROM fairness_metrics WHERE model_id = ?1",
            params![model_id],
        )
        .map_err(StorageError::from)?;
    Ok(deleted as i64)
}
