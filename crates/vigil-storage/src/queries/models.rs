//! model_registry CRUD queries.

use rusqlite::{params, Connection, OptionalExtension};
use vigil_core::errors::StorageError;
use vigil_core::types::{DeploymentStatus, GovernanceStatus};

use super::util::now_epoch;

/// A registered model.
#[derive(Debug, Clone)]
pub struct ModelRecord {
    pub id: i64,
    pub model_name: String,
    pub version: String,
    pub description: Option<String>,
    pub training_accuracy: Option<f64>,
    pub status: GovernanceStatus,
    pub deployment_status: DeploymentStatus,
    pub created_at: i64,
}

/// Fields for registering a new model.
#[derive(Debug, Clone)]
pub struct NewModel {
    pub model_name: String,
    pub version: String,
    pub description: Option<String>,
    pub training_accuracy: Option<f64>,
}

fn row_to_model(row: &rusqlite::Row<'_>) -> rusqlite::Result<ModelRecord> {
    let status: String = row.get(5)?;
    let deployment: String = row.get(6)?;
    Ok(ModelRecord {
        id: row.get(0)?,
        model_name: row.get(1)?,
        version: row.get(2)?,
        description: row.get(3)?,
        training_accuracy: row.get(4)?,
        status: GovernanceStatus::parse(&status),
        deployment_status: DeploymentStatus::parse(&deployment),
        created_at: row.get(7)?,
    })
}

const MODEL_COLUMNS: &str = "id, model_name, version, description, training_accuracy,
                             status, deployment_status, created_at";

/// Register a new model in draft status. Returns its id.
pub fn insert_model(conn: &Connection, model: &NewModel) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO model_registry
             (model_name, version, description, training_accuracy, status,
              deployment_status, created_at)
         VALUES (?1, ?2, ?3, ?4, 'draft', 'draft', ?5)",
        params![
            model.model_name,
            model.version,
            model.description,
            model.training_accuracy,
            now_epoch(),
        ],
    )
    .map_err(StorageError::from)?;
    Ok(conn.last_insert_rowid())
}

/// Get a model by id.
pub fn get_model(conn: &Connection, model_id: i64) -> Result<Option<ModelRecord>, StorageError> {
    conn.prepare_cached(&format!(
        "SELECT {MODEL_COLUMNS} FROM model_registry WHERE id = ?1"
    ))
    .map_err(StorageError::from)?
    .query_row(params![model_id], row_to_model)
    .optional()
    .map_err(StorageError::from)
}

/// List all registered models, newest first.
pub fn list_models(conn: &Connection) -> Result<Vec<ModelRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {MODEL_COLUMNS} FROM model_registry ORDER BY created_at DESC, id DESC"
        ))
        .map_err(StorageError::from)?;

    let rows = stmt.query_map([], row_to_model).map_err(StorageError::from)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(StorageError::from)?);
    }
    Ok(result)
}

/// Delete a model row. Fails with a constraint violation while child
/// rows exist; callers reset simulation data first.
pub fn delete_model(conn: &Connection, model_id: i64) -> Result<bool, StorageError> {
    let deleted = conn
        .execute("DELETE FROM model_registry WHERE id = ?1", params![model_id])
        .map_err(StorageError::from)?;
    Ok(deleted > 0)
}

/// Persist a governance status transition.
pub fn update_status(
    conn: &Connection,
    model_id: i64,
    status: GovernanceStatus,
) -> Result<(), StorageError> {
    let updated = conn
        .execute(
            "UPDATE model_registry SET status = ?1 WHERE id = ?2",
            params![status.as_str(), model_id],
        )
        .map_err(StorageError::from)?;
    if updated == 0 {
        return Err(StorageError::RowNotFound {
            entity: "model",
            id: model_id,
        });
    }
    Ok(())
}

/// Persist a deployment status transition.
pub fn update_deployment_status(
    conn: &Connection,
    model_id: i64,
    status: DeploymentStatus,
) -> Result<(), StorageError> {
    let updated = conn
        .execute(
            "UPDATE model_registry SET deployment_status = ?1 WHERE id = ?2",
            params![status.as_str(), model_id],
        )
        .map_err(StorageError::from)?;
    if updated == 0 {
        return Err(StorageError::RowNotFound {
            entity: "model",
            id: model_id,
        });
    }
    Ok(())
}
