//! Key-value repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-slot get/set/remove over the `kv_entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set_value` overwrites any prior value under the same key (last writer
//!   wins).
//! - `remove_value` on an absent key is a no-op.
//! - Values that are not text are reported as `InvalidData`, never masked.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for key-value persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidKey(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::InvalidData(message) => write!(f, "invalid stored value: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::InvalidColumnType(_, column, kind) => {
                Self::InvalidData(format!("column `{column}` holds {kind}, expected text"))
            }
            rusqlite::Error::FromSqlConversionFailure(_, kind, err) => {
                Self::InvalidData(format!("cannot convert {kind} value: {err}"))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Repository interface for single-slot string storage.
pub trait KeyValueRepository {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_value(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Returns whether a value was present and removed.
    fn remove_value(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed key-value repository.
///
/// Owns its connection so a long-lived session can hold it.
pub struct SqliteKeyValueRepository {
    conn: Connection,
}

impl SqliteKeyValueRepository {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueRepository for SqliteKeyValueRepository {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        ensure_key(key)?;

        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_value(&self, key: &str, value: &str) -> RepoResult<()> {
        ensure_key(key)?;

        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;

        Ok(())
    }

    fn remove_value(&self, key: &str) -> RepoResult<bool> {
        ensure_key(key)?;

        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

fn ensure_key(key: &str) -> RepoResult<()> {
    if key.trim().is_empty() {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(())
}
