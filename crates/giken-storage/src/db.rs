//! Database connection management.
//!
//! Wraps a single rusqlite Connection in a Mutex for thread-safe access and
//! exposes the `kv` table through [`KvStore`].

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use giken_core::{GikenError, Result};

use crate::kv::KvStore;
use crate::migrations;

/// Thread-safe SQLite database wrapper.
///
/// Uses WAL mode; the connection sits behind a Mutex since rusqlite
/// `Connection` is not `Sync`.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path and run migrations.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| GikenError::Storage(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| GikenError::Storage(format!("Failed to set pragmas: {}", e)))?;

        info!("Database opened at {}", path.display());

        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| GikenError::Storage(format!("Failed to open in-memory db: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Execute a closure with the underlying connection.
    ///
    /// The mutex is held for the duration of the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| GikenError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }
}

fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
        row.get(0)
    })
    .optional()
    .map_err(|e| GikenError::Storage(format!("Failed to read key {}: {}", key, e)))
}

fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Utc::now().timestamp()],
    )
    .map_err(|e| GikenError::Storage(format!("Failed to write key {}: {}", key, e)))?;
    Ok(())
}

impl KvStore for Database {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| read_value(conn, key))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| write_value(conn, key, value))
    }

    fn update_raw(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<String>,
    ) -> Result<String> {
        self.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| GikenError::Storage(format!("Failed to begin transaction: {}", e)))?;
            let next = f(read_value(&tx, key)?)?;
            write_value(&tx, key, &next)?;
            tx.commit()
                .map_err(|e| GikenError::Storage(format!("Failed to commit: {}", e)))?;
            Ok(next)
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
