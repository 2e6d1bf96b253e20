//! Key-value preference storage.
//!
//! # Responsibility
//! - Define the process-wide key/value contract the notes store persists into.
//! - Keep SQL details behind `SqlitePreferenceStore`.
//!
//! # Invariants
//! - `write` replaces the whole value stored under a key.
//! - Reading a key that was never written returns `Ok(None)`, not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqlitePreferenceStore;

pub type PrefsResult<T> = Result<T, PrefsError>;

/// Preference storage failure.
#[derive(Debug)]
pub enum PrefsError {
    Db(DbError),
    /// Connection lacks the migrated `preferences` table.
    MissingTable(&'static str),
}

impl Display for PrefsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for PrefsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingTable(_) => None,
        }
    }
}

impl From<DbError> for PrefsError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PrefsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value contract used for note persistence.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn read(&self, key: &str) -> PrefsResult<Option<String>>;
    /// Stores `value` under `key`, overwriting any previous value.
    fn write(&self, key: &str, value: &str) -> PrefsResult<()>;
    /// Removes `key`; returns whether a value existed.
    fn remove(&self, key: &str) -> PrefsResult<bool>;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for &P {
    fn read(&self, key: &str) -> PrefsResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> PrefsResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> PrefsResult<bool> {
        (**self).remove(key)
    }
}
