//! SQLite home of the memo blob table.
//!
//! The memo store persists one opaque value per key. This module owns the
//! single table holding those values (`blobs`), the connection setup that
//! creates it, and the readiness check repositories run before touching it.
//!
//! # Invariants
//! - `blobs` is created by migration 1 and tracked via `PRAGMA user_version`.
//! - No blob is read or written before migrations succeed.
//! - A connection is blob-ready only once `BLOBS_TABLE` exists.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding one `(key, value, updated_at)` row per persisted blob.
pub const BLOBS_TABLE: &str = "blobs";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Returns whether `conn` already carries the blob table.
pub fn has_blob_table(conn: &Connection) -> DbResult<bool> {
    table_exists(conn, BLOBS_TABLE)
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
