//! governance_policies CRUD queries.
//!
//! The single-active-policy invariant lives in the schema (partial
//! unique index on `active WHERE active = 1`); activation toggles
//! inside one transaction so the invariant never observably breaks.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;

use super::util::now_epoch;

/// A governance policy row.
#[derive(Debug, Clone)]
pub struct PolicyRecord {
    pub id: i64,
    pub name: String,
    pub max_allowed_mri: f64,
    pub max_allowed_disparity: f64,
    pub approval_required_above_mri: f64,
    pub active: bool,
    pub created_at: i64,
}

/// Fields for creating a policy.
#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub name: String,
    pub max_allowed_mri: f64,
    pub max_allowed_disparity: f64,
    pub approval_required_above_mri: f64,
}

fn row_to_policy(row: &rusqlite::Row<'_>) -> rusqlite::Result<PolicyRecord> {
    Ok(PolicyRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        max_allowed_mri: row.get(2)?,
        max_allowed_disparity: row.get(3)?,
        approval_required_above_mri: row.get(4)?,
        active: row.get::<_, i64>(5)? != 0,
        created_at: row.get(6)?,
    })
}

const POLICY_COLUMNS: &str = "id, name, max_allowed_mri, max_allowed_disparity,
                              approval_required_above_mri, active, created_at";

/// Create a policy (inactive until activated). A duplicate name
/// surfaces as a constraint violation.
pub fn insert_policy(conn: &Connection, policy: &NewPolicy) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO governance_policies
             (name, max_allowed_mri, max_allowed_disparity,
              approval_required_above_mri, active, created_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        params![
            policy.name,
            policy.max_allowed_mri,
            policy.max_allowed_disparity,
            policy.approval_required_above_mri,
            now_epoch(),
        ],
    )
    .map_err(StorageError::from)?;
    Ok(conn.last_insert_rowid())
}

/// Get a policy by id.
pub fn get_policy(conn: &Connection, policy_id: i64) -> Result<Option<PolicyRecord>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {POLICY_COLUMNS} FROM governance_policies WHERE id = ?1"
    ))
    .map_err(StorageError::from)?
    .query_row(params![policy_id], row_to_policy)
    .optional()
    .map_err(StorageError::from)
}

/// List policies, newest first.
pub fn list_policies(
    conn: &Connection,
    active_only: bool,
) -> Result<Vec<PolicyRecord>, StorageError> {
    let sql = if active_only {
        format!(
            "SELECT {POLICY_COLUMNS} FROM governance_policies
             WHERE active = 1 ORDER BY created_at DESC, id DESC"
        )
    } else {
        format!(
            "SELECT {POLICY_COLUMNS} FROM governance_policies
             ORDER BY created_at DESC, id DESC"
        )
    };
    let mut stmt = conn.prepare_cached(&sql).map_err(StorageError::from)?;

    let rows = stmt
        .query_map([], row_to_policy)
        .map_err(StorageError::from)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::from)?);
    }
    Ok(result)
}

/// The active policy, if any. Governance evaluation fails closed on
/// `None`.
pub fn active_policy(conn: &Connection) -> Result<Option<PolicyRecord>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {POLICY_COLUMNS} FROM governance_policies WHERE active = 1"
    ))
    .map_err(StorageError::from)?
    .query_row([], row_to_policy)
    .optional()
    .map_err(StorageError::from)
}

/// Update a policy's thresholds.
pub fn update_policy(conn: &Connection, policy: &PolicyRecord) -> Result<(), StorageError> {
    let updated = conn
        .execute(
            "UPDATE governance_policies
             SET name = ?1, max_allowed_mri = ?2, max_allowed_disparity = ?3,
                 approval_required_above_mri = ?4
             WHERE id = ?5",
            params![
                policy.name,
                policy.max_allowed_mri,
                policy.max_allowed_disparity,
                policy.approval_required_above_mri,
                policy.id,
            ],
        )
        .map_err(StorageError::from)?;
    if updated == 0 {
        return Err(StorageError::RowNotFound {
            entity: "policy",
            id: policy.id,
        });
    }
    Ok(())
}

/// Delete a policy.
pub fn delete_policy(conn: &Connection, policy_id: i64) -> Result<bool, StorageError> {
    let deleted = conn
        .execute(
            "DELETE FROM governance_policies WHERE id = ?1",
            params![policy_id],
        )
        .map_err(StorageError::from)?;
    Ok(deleted > 0)
}

/// Activate a policy, deactivating any predecessor in the same
/// transaction. The partial unique index would reject two active rows
/// even if this ordering were broken.
pub fn activate_policy(conn: &mut Connection, policy_id: i64) -> Result<(), StorageError> {
    let tx = conn.transaction().map_err(StorageError::from)?;
    tx.execute(
        "UPDATE governance_policies SET active = 0 WHERE active = 1",
        [],
    )
    .map_err(StorageError::from)?;
    let updated = tx
        .execute(
            "UPDATE governance_policies SET active = 1 WHERE id = ?1",
            params![policy_id],
        )
        .map_err(StorageError::from)?;
    if updated == 0 {
        return Err(StorageError::RowNotFound {
            entity: "policy",
            id: policy_id,
        });
    }
    tx.commit().map_err(StorageError::from)?;
    Ok(())
}
