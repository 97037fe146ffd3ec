//! drift_metrics queries. Append-only; reads use latest-by-timestamp.

use rusqlite::{params, Connection};
use vigil_core::errors::StorageError;

/// A drift metric row.
#[derive(Debug, Clone)]
pub struct DriftMetricRecord {
    pub id: i64,
    pub model_id: i64,
    pub feature_name: String,
    pub psi_value: f64,
    pub ks_statistic: f64,
    pub drift_flag: bool,
    pub timestamp: i64,
}

/// Fields for one new drift metric row.
#[derive(Debug, Clone)]
pub struct NewDriftMetric {
    pub model_id: i64,
    pub feature_name: String,
    pub psi_value: f64,
    pub ks_statistic: f64,
    pub drift_flag: bool,
    pub timestamp: i64,
}

fn row_to_metric(row: &rusqlite::Row<'_>) -> rusqlite::Result<DriftMetricRecord> {
    Ok(DriftMetricRecord {
        id: row.get(0)?,
        model_id: row.get(1)?,
        feature_name: row.get(2)?,
        psi_value: row.get(3)?,
        ks_statistic: row.get(4)?,
        drift_flag: row.get::<_, i64>(5)? != 0,
        timestamp: row.get(6)?,
    })
}

/// Insert one evaluation run's metric rows atomically.
pub fn insert_batch(
    conn: &mut Connection,
    metrics: &[NewDriftMetric],
) -> Result<usize, StorageError> {
    let tx = conn.transaction().map_err(StorageError::from)?;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO drift_metrics
                     (model_id, feature_name, psi_value, ks_statistic, drift_flag, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(StorageError::from)?;
        for metric in metrics {
            stmt.execute(params![
                metric.model_id,
                metric.feature_name,
                metric.psi_value,
                metric.ks_statistic,
                metric.drift_flag as i64,
                metric.timestamp,
            ])
            .map_err(StorageError::from)?;
        }
    }
    tx.commit().map_err(StorageError::from)?;
    Ok(metrics.len())
}

/// Latest metric row per feature. Feeds the risk composer's averages,
/// so recomputation between runs is idempotent.
pub fn latest_per_feature(
    conn: &Connection,
    model_id: i64,
) -> Result<Vec<DriftMetricRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, model_id, feature_name, psi_value, ks_statistic, drift_flag, timestamp
             FROM drift_metrics
             WHERE model_id = ?1
               AND id IN (
                   SELECT MAX(id) FROM drift_metrics
                   WHERE model_id = ?1
                   GROUP BY feature_name
               )
             ORDER BY feature_name",
        )
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
) -> Result<Vec<DriftMetricRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, model_id, feature_name, psi_value, ks_statistic, drift_flag, timestamp
             FROM drift_metrics
             WHERE model_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2",
        )
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
    conn.prepare_cached("SELECT COUNT(*) FROM drift_metrics WHERE model_id = ?1")
        .map_err(StorageError::from)?
        .query_row(params![model_id], |row| row.get(0))
        .map_err(StorageError::from)
}

/// Delete all metric rows for a model.
pub fn delete_for_model(conn: &Connection, model_id: i64) -> Result<i64, StorageError> {
    let deleted = conn
        .execute(
            "DELETE FROM drift_metrics WHERE model_id = ?1",
            params![model_id],
        )
        .map_err(StorageError::from)?;
    Ok(deleted as i64)
}
