//! audit_log queries. Best-effort trail for governance, deployment,
//! and simulation actions; an audit failure never fails the action.

use rusqlite::{params, Connection};
use vigil_core::errors::StorageError;

use super::util::now_epoch;

/// An audit log row.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub id: i64,
    pub model_id: Option<i64>,
    pub action: String,
    pub action_status: String,
    pub risk_score: Option<f64>,
    pub disparity_score: Option<f64>,
    pub governance_status: Option<String>,
    pub deployment_status: Option<String>,
    pub override_used: Option<bool>,
    pub details: Option<serde_json::Value>,
    pub created_at: i64,
}

/// Fields for one new audit entry.
#[derive(Debug, Clone, Default)]
pub struct NewAuditEntry {
    pub model_id: Option<i64>,
    pub action: String,
    pub action_status: String,
    pub risk_score: Option<f64>,
    pub disparity_score: Option<f64>,
    pub governance_status: Option<String>,
    pub deployment_status: Option<String>,
    pub override_used: Option<bool>,
    pub details: Option<serde_json::Value>,
}

/// Insert an audit entry.
pub fn insert_entry(conn: &Connection, entry: &NewAuditEntry) -> Result<i64, StorageError> {
    let details = match &entry.details {
        Some(v) => Some(serde_json::to_string(v).map_err(|e| StorageError::SqliteError {
            message: format!("failed to serialize audit details: {e}"),
        })?),
        None => None,
    };
    conn.prepare_cached(
        "INSERT INTO audit_log
             (model_id, action, action_status, risk_score, disparity_score,
              governance_status, deployment_status, override_used, details, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .map_err(StorageError::from)?
    .execute(params![
        entry.model_id,
        entry.action,
        entry.action_status,
        entry.risk_score,
        entry.disparity_score,
        entry.governance_status,
        entry.deployment_status,
        entry.override_used.map(|b| b as i64),
        details,
        now_epoch(),
    ])
    .map_err(StorageError::from)?;
    Ok(conn.last_insert_rowid())
}

/// Insert an entry, logging (not propagating) any failure.
pub fn record_best_effort(conn: &Connection, entry: &NewAuditEntry) {
    if let Err(e) = insert_entry(conn, entry) {
        tracing::error!(
            action = %entry.action,
            model_id = ?entry.model_id,
            error = %e,
            "failed to write audit entry"
        );
    }
}

/// Recent audit entries, newest first.
pub fn recent_entries(conn: &Connection, limit: i64) -> Result<Vec<AuditRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, model_id, action, action_status, risk_score, disparity_score,
                    governance_status, deployment_status, override_used, details, created_at
             FROM audit_log
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )
        .map_err(StorageError::from)?;

    let rows = stmt
        .query_map(params![limit], |row| {
            let details_json: Option<String> = row.get(9)?;
            Ok(AuditRecord {
                id: row.get(0)?,
                model_id: row.get(1)?,
                action: row.get(2)?,
                action_status: row.get(3)?,
                risk_score: row.get(4)?,
                disparity_score: row.get(5)?,
                governance_status: row.get(6)?,
                deployment_status: row.get(7)?,
                override_used: row.get::<_, Option<i64>>(8)?.map(|v| v != 0),
                details: details_json.and_then(|s| serde_json::from_str(&s).ok()),
                created_at: row.get(10)?,
            })
        })
        .map_err(StorageError::from)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::from)?);
    }
    Ok(result)
}
