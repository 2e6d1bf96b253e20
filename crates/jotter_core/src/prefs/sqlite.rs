//! SQLite-backed preference store.

use super::{PreferenceStore, PrefsError, PrefsResult};
use rusqlite::{params, Connection, OptionalExtension};

const PREFERENCES_TABLE: &str = "preferences";

/// Preference store over the migrated `preferences` table.
pub struct SqlitePreferenceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `PrefsError::MissingTable` when the connection was not opened
    ///   through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> PrefsResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [PREFERENCES_TABLE],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(PrefsError::MissingTable(PREFERENCES_TABLE));
        }
        Ok(Self { conn })
    }
}

impl PreferenceStore for SqlitePreferenceStore<'_> {
    fn read(&self, key: &str) -> PrefsResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> PrefsResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> PrefsResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}
