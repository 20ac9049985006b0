//! Key/blob repository contracts and implementations.
//!
//! # Responsibility
//! - Read and overwrite one byte blob per string key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `read` on an unknown key is `Ok(None)`, never an error.
//! - `write` replaces any previous value for the key.

use crate::db::{has_blob_table, DbError, BLOBS_TABLE};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BlobResult<T> = Result<T, BlobError>;

/// Error for blob persistence operations.
#[derive(Debug)]
pub enum BlobError {
    /// Keys must be non-empty after trimming.
    InvalidKey(String),
    Db(DbError),
    /// Connection is not migrated for blob storage.
    MissingRequiredTable(&'static str),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid blob key: `{key}`"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for BlobError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Byte-blob store addressed by string keys.
pub trait BlobRepository {
    /// Returns the stored value for `key`, or `None` when absent.
    fn read(&self, key: &str) -> BlobResult<Option<Vec<u8>>>;
    /// Overwrites the value stored at `key`.
    fn write(&mut self, key: &str, value: &[u8]) -> BlobResult<()>;
}

/// SQLite-backed blob repository over the `blobs` table.
pub struct SqliteBlobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails when the `blobs` table is missing (i.e. the connection was not
    /// opened through `open_db`/`open_db_in_memory`).
    pub fn try_new(conn: &'conn Connection) -> BlobResult<Self> {
        if !has_blob_table(conn)? {
            return Err(BlobError::MissingRequiredTable(BLOBS_TABLE));
        }
        Ok(Self { conn })
    }
}

impl BlobRepository for SqliteBlobRepository<'_> {
    fn read(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        let key = validate_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &[u8]) -> BlobResult<()> {
        let key = validate_key(key)?;
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local blob repository.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBlobRepository {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemoryBlobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one value, e.g. a legacy or corrupt payload in tests.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl BlobRepository for InMemoryBlobRepository {
    fn read(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        let key = validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &[u8]) -> BlobResult<()> {
        let key = validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

fn validate_key(key: &str) -> BlobResult<&str> {
    if key.trim().is_empty() {
        return Err(BlobError::InvalidKey(key.to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::{BlobError, BlobRepository, InMemoryBlobRepository};

    #[test]
    fn in_memory_write_overwrites_previous_value() {
        let mut repo = InMemoryBlobRepository::new();
        repo.write("k", b"first").unwrap();
        repo.write("k", b"second").unwrap();

        assert_eq!(repo.read("k").unwrap().as_deref(), Some(&b"second"[..]));
        assert_eq!(repo.read("other").unwrap(), None);
    }

    #[test]
    fn blank_key_is_rejected() {
        let repo = InMemoryBlobRepository::new();
        let err = repo.read("  ").unwrap_err();
        assert!(matches!(err, BlobError::InvalidKey(_)));
    }
}
