//! Key/value queries over the session table.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_ENTRY_SQL: &str = "SELECT value FROM session_entries WHERE key = ?1";
const UPSERT_ENTRY_SQL: &str = "INSERT INTO session_entries (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_ENTRY_SQL: &str = "DELETE FROM session_entries WHERE key = ?1";

impl super::Database {
    /// Reads a session entry.
    pub fn get_entry(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_ENTRY_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read session entry")
    }

    /// Writes or replaces a session entry.
    pub fn put_entry(&self, key: &str, value: &str) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_ENTRY_SQL, params![key, value, now])
            .db_context("Failed to write session entry")?;
        Ok(())
    }

    /// Removes the given entries in one transaction.
    pub fn remove_entries(&mut self, keys: &[&str]) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for key in keys {
            tx.execute(DELETE_ENTRY_SQL, params![key])
                .db_context("Failed to remove session entry")?;
        }

        tx.commit().db_context("Failed to commit transaction")
    }
}
