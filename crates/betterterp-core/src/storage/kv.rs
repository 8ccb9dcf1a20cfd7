//! SQLite-backed key-value store.
//!
//! A single `kv` table stands in for the browser's local storage so that
//! streaks and checklists survive between CLI invocations.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::warn;

use super::{data_dir, PersistenceGateway};
use crate::error::StorageError;

pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open the store at `~/.config/betterterp/betterterp.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("betterterp.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    fn query(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl PersistenceGateway for KvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.query(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "kv read failed; treating as absent");
            None
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn kv_store() {
        let mut store = KvStore::open_memory().unwrap();
        assert!(store.get("test").is_none());
        store.set("test", "hello").unwrap();
        assert_eq!(store.get("test").unwrap(), "hello");
        store.set("test", "again").unwrap();
        assert_eq!(store.get("test").unwrap(), "again");
        store.remove("test").unwrap();
        assert!(store.get("test").is_none());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("betterterp.db");
        {
            let mut store = KvStore::open_at(&path).unwrap();
            store.set("streak-alice", "3").unwrap();
        }
        let store = KvStore::open_at(&path).unwrap();
        assert_eq!(store.get("streak-alice").as_deref(), Some("3"));
    }

    #[test]
    fn open_in_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("betterterp.db");
        assert!(matches!(
            KvStore::open_at(&path),
            Err(StorageError::OpenFailed { .. })
        ));
    }
}
