//! risk_history queries. Append-only audit trail; the latest row by
//! timestamp is "current risk".

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;

/// A risk history row.
#[derive(Debug, Clone)]
pub struct RiskHistoryRecord {
    pub id: i64,
    pub model_id: i64,
    pub risk_score: f64,
    pub drift_component: f64,
    pub fairness_component: f64,
    pub timestamp: i64,
}

/// Fields for one new risk history row.
#[derive(Debug, Clone)]
pub struct NewRiskEntry {
    pub model_id: i64,
    pub risk_score: f64,
    pub drift_component: f64,
    pub fairness_component: f64,
    pub timestamp: i64,
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<RiskHistoryRecord> {
    Ok(RiskHistoryRecord {
        id: row.get(0)?,
        model_id: row.get(1)?,
        risk_score: row.get(2)?,
        drift_component: row.get(3)?,
        fairness_component: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

/// Append one risk entry. Returns its id.
pub fn insert_entry(conn: &Connection, entry: &NewRiskEntry) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO risk_history
             (model_id, risk_score, drift_component, fairness_component, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .map_err(StorageError::from)?
    .execute(params![
        entry.model_id,
        entry.risk_score,
        entry.drift_component,
        entry.fairness_component,
        entry.timestamp,
    ])
    .map_err(StorageError::from)?;
    Ok(conn.last_insert_rowid())
}

/// Append a batch of entries atomically. Used by the staged risk
/// trajectory.
pub fn insert_batch(conn: &mut Connection, entries: &[NewRiskEntry]) -> Result<usize, StorageError> {
    let tx = conn.transaction().map_err(StorageError::from)?;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO risk_history
                     (model_id, risk_score, drift_component, fairness_component, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(StorageError::from)?;
        for entry in entries {
            stmt.execute(params![
                entry.model_id,
                entry.risk_score,
                entry.drift_component,
                entry.fairness_component,
                entry.timestamp,
            ])
            .map_err(StorageError::from)?;
        }
    }
    tx.commit().map_err(StorageError::from)?;
    Ok(entries.len())
}

/// Current risk: latest entry by timestamp.
pub fn latest(conn: &Connection, model_id: i64) -> Result<Option<RiskHistoryRecord>, StorageError> {
    conn.prepare_cached(
        "SELECT id, model_id, risk_score, drift_component, fairness_component, timestamp
         FROM risk_history
         WHERE model_id = ?1
         ORDER BY timestamp DESC, id DESC
         LIMIT 1",
    )
    .map_err(StorageError::from)?
    .query_row(params![model_id], row_to_entry)
    .optional()
    .map_err(StorageError::from)
}

/// Risk history for a model, newest first.
pub fn history(
    conn: &Connection,
    model_id: i64,
    limit: i64,
) -> Result<Vec<RiskHistoryRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, model_id, risk_score, drift_component, fairness_component, timestamp
             FROM risk_history
             WHERE model_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2",
        )
        .map_err(StorageError::from)?;

    let rows = stmt
        .query_map(params![model_id, limit], row_to_entry)
        .map_err(StorageError::from)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::from)?);
    }
    Ok(result)
}

/// Count entries for a model.
pub fn count_for_model(conn: &Connection, model_id: i64) -> Result<i64, StorageError> {
    conn.prepare_cached("SELECT COUNT(*) FROM risk_history WHERE model_id = ?1")
        .map_err(StorageError::from)?
        .query_row(params![model_id], |row| row.get(0))
        .map_err(StorageError::from)
}

/// Delete all entries for a model.
pub fn delete_for_model(conn: &Connection, model_id: i64) -> Result<i64, StorageError> {
    let deleted = conn
        .execute(
            "DELETE FROM risk_history WHERE model_id = ?1",
            params![model_id],
        )
        .map_err(StorageError::from)?;
    Ok(deleted as i64)
}
