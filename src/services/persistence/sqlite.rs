use rusqlite::{params, OptionalExtension};

use super::{KeyValueStore, StoreError};
use crate::services::database::Database;

/// Key-value entries in the `key_value` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Expects a database whose schema has already been initialized.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.db.connection().execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.db
            .connection()
            .execute("DELETE FROM key_value WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        SqliteStore::new(db)
    }

    #[test]
    fn test_set_overwrites_existing_value() {
        let mut store = store();
        store.set("endDate", "2030-01-01").unwrap();
        store.set("endDate", "2031-01-01").unwrap();
        assert_eq!(store.get("endDate").unwrap().as_deref(), Some("2031-01-01"));
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        assert_eq!(store().get("eventName").unwrap(), None);
    }

    #[test]
    fn test_remove_deletes_entry() {
        let mut store = store();
        store.set("eventName", "Exam").unwrap();
        store.remove("eventName").unwrap();
        store.remove("eventName").unwrap();
        assert_eq!(store.get("eventName").unwrap(), None);
    }

    #[test]
    fn test_uninitialized_schema_reports_error() {
        let store = SqliteStore::new(Database::new(":memory:").unwrap());
        assert!(matches!(store.get("eventName"), Err(StoreError::Sqlite(_))));
    }
}
