use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::Result;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage operation failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable mirror of in-memory keyed collections
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - Battle-tested and reliable
/// - Doesn't require a separate process
///
/// One row per logical collection, keyed by an opaque string. Every save
/// overwrites the whole value - the collections are tiny (a handful of
/// providers, ten searches) so there is nothing to gain from deltas.
pub struct SetStore {
    conn: Mutex<Connection>,
}

impl SetStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Ephemeral store for tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Load a collection by key
    ///
    /// Missing or undecodable state is treated as "no prior state": the
    /// caller gets the default value and the app keeps working. The only
    /// trace of a corrupt row is a warning in the logs.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.get_raw(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read stored collection {}: {}", key, e);
                return T::default();
            }
        };

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to decode stored collection {}: {}", key, e);
                    T::default()
                }
            },
            None => T::default(),
        }
    }

    /// Persist a collection, replacing any prior value for the key
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO collections (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, &json),
        )?;
        Ok(())
    }

    /// Drop a stored collection entirely
    pub fn delete(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute("DELETE FROM collections WHERE key = ?1", (key,))?;
        Ok(())
    }

    fn get_raw(&self, key: &str) -> rusqlite::Result<Option<String>> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.query_row(
            "SELECT value FROM collections WHERE key = ?1",
            (key,),
            |row| row.get(0),
        )
        .optional()
    }

    /// Write a raw string value - test helper for corruption scenarios
    #[doc(hidden)]
    pub fn save_raw(&self, key: &str, raw: &str) -> Result<()> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO collections (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, raw),
        )?;
        Ok(())
    }
}
