//! Database connection handling.

pub mod pragmas;

use std::path::Path;

use rusqlite::Connection;
use vigil_core::errors::StorageError;

use crate::migrations;

/// An open Vigil database: pragmas applied, migrations run.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(StorageError::from)?;
        Self::init(conn)
    }

    /// Open an in-memory database. Used by tests and the sandbox
    /// governance check.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        pragmas::apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Shared access for reads and single-statement writes.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Exclusive access for multi-statement transactions.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
