//! Model registry operations.
//!
//! Thin validation layer over the storage CRUD; deletion refuses while
//! monitoring artifacts still reference the model.

use vigil_core::errors::{MonitorError, MonitorResult, StorageError, ValidationError};
use vigil_storage::queries::models::{self, ModelRecord, NewModel};
use vigil_storage::queries::prediction_logs;
use vigil_storage::Database;

/// Register a new model in draft status.
pub fn register_model(db: &Database, model: &NewModel) -> MonitorResult<ModelRecord> {
    if model.model_name.trim().is_empty() {
        return Err(ValidationError::EmptyModelName.into());
    }

    let id = models::insert_model(db.conn(), model)?;
    tracing::info!(model_id = id, name = %model.model_name, "model registered");
    models::get_model(db.conn(), id)?.ok_or(MonitorError::Storage(StorageError::RowNotFound {
        entity: "model",
        id,
    }))
}

/// Delete a model. Fails while prediction logs still reference it;
/// reset the simulation first.
pub fn delete_model(db: &Database, model_id: i64) -> MonitorResult<()> {
    let log_count = prediction_logs::count_logs(db.conn(), model_id)?;
    if log_count > 0 {
        return Err(MonitorError::Storage(StorageError::ConstraintViolation {
            message: format!("model {model_id} still has {log_count} prediction logs"),
        }));
    }
    if !models::delete_model(db.conn(), model_id)? {
        return Err(MonitorError::Storage(StorageError::RowNotFound {
            entity: "model",
            id: model_id,
        }));
    }
    tracing::info!(model_id, "model deleted");
    Ok(())
}
