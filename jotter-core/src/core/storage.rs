//! Durable key/value storage backing a single storage origin.
//!
//! Everything Jotter persists (the device identifier, the notes collection,
//! the zoom preference) is a string value under a string key. One SQLite file
//! is one origin; two files share nothing.

use crate::{JotterError, Result};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// A string-keyed store of string values.
///
/// `set` overwrites any previous value for the key entirely.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// A [`KeyValueStore`] backed by a SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Creates (or reuses) the database at `path` and ensures the `kv` table exists.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Opens an existing database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`JotterError::InvalidStore`] if the file does not contain a
    /// `kv` table, or [`JotterError::Database`] if it is not SQLite at all.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = 'kv'",
            [],
            |row| row.get(0),
        )?;

        if table_count != 1 {
            return Err(JotterError::InvalidStore(
                "Not a valid Jotter database".to_string(),
            ));
        }

        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Opens `path` if it exists, otherwise creates it along with any missing
    /// parent directories.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::open(path);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        log::info!("creating notes database at {}", path.display());
        Self::create(path)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| JotterError::InvalidStore("storage lock poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .connection()?
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.connection()?.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}

/// A process-local [`KeyValueStore`]; its contents vanish with it.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| JotterError::InvalidStore("storage lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_create_storage() {
        let temp = NamedTempFile::new().unwrap();
        let store = SqliteStore::create(temp.path()).unwrap();

        let tables: Vec<String> = store
            .connection()
            .unwrap()
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"kv".to_string()));
    }

    #[test]
    fn test_open_existing_storage_keeps_values() {
        let temp = NamedTempFile::new().unwrap();
        {
            let store = SqliteStore::create(temp.path()).unwrap();
            store.set("deviceUserId", "abc").unwrap();
        }

        let store = SqliteStore::open(temp.path()).unwrap();
        assert_eq!(store.get("deviceUserId").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_open_invalid_database() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "not a database").unwrap();

        assert!(SqliteStore::open(temp.path()).is_err());
    }

    #[test]
    fn test_open_database_without_kv_table() {
        let temp = NamedTempFile::new().unwrap();
        {
            let conn = Connection::open(temp.path()).unwrap();
            conn.execute("CREATE TABLE other (id INTEGER PRIMARY KEY)", []).unwrap();
        }

        let result = SqliteStore::open(temp.path());
        assert!(matches!(result, Err(JotterError::InvalidStore(_))));
    }

    #[test]
    fn test_open_or_create_makes_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("jotter.db");

        let store = SqliteStore::open_or_create(&path).unwrap();
        store.set("k", "v").unwrap();
        drop(store);

        let reopened = SqliteStore::open_or_create(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_set_overwrites() {
        let temp = NamedTempFile::new().unwrap();
        let store = SqliteStore::create(temp.path()).unwrap();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
    }
}
