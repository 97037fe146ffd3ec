//! SQLite persistence for Vigil.
//!
//! Connection handling with WAL pragmas, `PRAGMA user_version` migrations,
//! and per-table query modules. All metric tables are append-only; batch
//! writes go through transactions and are all-or-nothing.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::Database;
