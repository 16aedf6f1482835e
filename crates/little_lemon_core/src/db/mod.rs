//! Local SQLite storage for the profile slot.
//!
//! The database only backs the `kv_entries` table read and written by
//! [`crate::repo::kv_repo::SqliteKeyValueRepository`]. Connections are handed
//! out by [`open_db`] and [`open_db_in_memory`] with the schema already at
//! [`migrations::latest_version`]; a file written by a newer build is refused
//! rather than downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the profile database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// On-disk `user_version` is ahead of what this build knows.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "profile database uses schema {found}, this build supports up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
