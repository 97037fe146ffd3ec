//! Persistence errors.

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur in the SQLite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database is busy")]
    DbBusy,

    #[error("Migration to version {version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("{entity} {id} not found")]
    RowNotFound { entity: &'static str, id: i64 },
}

impl VigilErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::RowNotFound { .. } => error_code::MODEL_NOT_FOUND,
            _ => error_code::STORAGE_ERROR,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(code, _) => match code.code {
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                    Self::DbBusy
                }
                rusqlite::ErrorCode::ConstraintViolation => Self::ConstraintViolation {
                    message: e.to_string(),
                },
                _ => Self::SqliteError {
                    message: e.to_string(),
                },
            },
            _ => Self::SqliteError {
                message: e.to_string(),
            },
        }
    }
}
