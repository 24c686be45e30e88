//! Settings in a single SQLite table, read through a `DashMap` cache.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use dashmap::DashMap;
use rusqlite::{Connection, OptionalExtension, params};

use super::{SettingsBackend, SettingsError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value BLOB NOT NULL
)";

pub struct SqliteBackend {
    db: Mutex<Connection>,
    /// Blobs already read or written. Every write goes to the table first.
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open the database file, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, SettingsError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(db: Connection) -> Result<Self, SettingsError> {
        db.execute(SCHEMA, [])?;
        Ok(Self {
            db: Mutex::new(db),
            cache: DashMap::new(),
        })
    }

    fn db(&self) -> Result<MutexGuard<'_, Connection>, SettingsError> {
        self.db.lock().map_err(|_| SettingsError::Poisoned)
    }
}

impl SettingsBackend for SqliteBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(blob) = self.cache.get(key) {
            return Ok(Some(blob.to_vec()));
        }

        let blob: Option<Vec<u8>> = self
            .db()?
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        if let Some(blob) = &blob {
            self.cache.insert(key.to_owned(), blob.clone());
        }
        Ok(blob)
    }

    fn write(&self, key: &str, blob: &[u8]) -> Result<(), SettingsError> {
        self.db()?.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, blob],
        )?;
        self.cache.insert(key.to_owned(), blob.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.db()?.execute("DELETE FROM settings WHERE key = ?1", [key])?;
        self.cache.remove(key);
        Ok(())
    }

    fn keys_under(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        // substr instead of LIKE: `_` and `%` are common in keys.
        let db = self.db()?;
        let mut query = db.prepare(
            "SELECT key FROM settings WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let keys = query
            .query_map([prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}
