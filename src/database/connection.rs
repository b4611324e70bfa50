//! Database connection management
//!
//! This module provides the core connection wrapper plus the manager that
//! enforces the "exactly one database open at a time" lifecycle used
//! throughout sqlscope.

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Result, ScopeError};

/// Core database connection wrapper
///
/// `DatabaseConn` is a thin wrapper around a SQLite connection, handling
/// both file-based and in-memory databases with consistent configuration
/// and error handling. SQLite (bundled) runs in its serialized threading
/// mode, so re-entrant use of one handle is serialized by the engine
/// itself rather than by external locking.
pub struct DatabaseConn {
    pub conn: Connection,
}

impl DatabaseConn {
    /// Open a database at the specified path
    ///
    /// If the path is `None`, an in-memory database is created. The file
    /// is created when it does not exist yet.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(p) => Connection::open(p).map_err(|e| ScopeError::Open {
                path: p.to_string(),
                reason: e.to_string(),
            })?,
            None => Connection::open_in_memory().map_err(|e| ScopeError::Open {
                path: ":memory:".to_string(),
                reason: e.to_string(),
            })?,
        };

        let db = DatabaseConn { conn };
        db.configure(path)?;
        Ok(db)
    }

    /// Open a database at the specified path (convenience method)
    pub fn open_path(path: &str) -> Result<Self> {
        Self::open(Some(path))
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(None)
    }

    /// Configure the session and probe the file for validity
    ///
    /// `Connection::open` succeeds lazily on a corrupt or non-SQLite file;
    /// reading `schema_version` forces the header to be parsed so bad
    /// files are rejected at open time.
    fn configure(&self, path: Option<&str>) -> Result<()> {
        let _: i64 = self
            .conn
            .query_row("PRAGMA schema_version", [], |row| row.get(0))
            .map_err(|e| ScopeError::Open {
                path: path.unwrap_or(":memory:").to_string(),
                reason: e.to_string(),
            })?;

        // Session-scoped setting; does not alter the file itself
        self.conn
            .execute_batch("PRAGMA foreign_keys=ON")
            .map_err(ScopeError::statement)?;

        Ok(())
    }

    /// Execute a single SQL statement
    pub fn execute(&self, sql: &str) -> Result<usize> {
        self.conn.execute(sql, []).map_err(ScopeError::statement)
    }

    /// Execute a single SQL statement with bound parameters
    pub fn execute_with_params<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<usize> {
        self.conn
            .execute(sql, params)
            .map_err(ScopeError::statement)
    }

    /// Begin an unchecked transaction
    ///
    /// Used by the batch executor to commit multiple statements atomically.
    pub fn transaction(&self) -> Result<rusqlite::Transaction<'_>> {
        self.conn
            .unchecked_transaction()
            .map_err(ScopeError::statement)
    }

    /// Check if a table exists in the database
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table_name],
                |row| row.get(0),
            )
            .map_err(ScopeError::statement)?;
        Ok(count > 0)
    }
}

/// Exclusive owner of the single active database handle
///
/// At most one database is open at a time. `open` releases the previous
/// handle before acquiring the new one, so no resources leak across
/// re-opens. Values returned by the other components are owned copies;
/// after a close or re-open, callers re-fetch rather than reuse.
#[derive(Default)]
pub struct ConnectionManager {
    active: Option<(String, DatabaseConn)>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        ConnectionManager::default()
    }

    /// Open (or create) the database file at `path`, closing any
    /// previously open database first
    pub fn open(&mut self, path: &str) -> Result<()> {
        // Drop the old handle before the new open, not after
        if let Some((old, _)) = self.active.take() {
            debug!(path = %old, "closing previous database");
        }
        let db = DatabaseConn::open_path(path)?;
        info!(path = %path, "database opened");
        self.active = Some((path.to_string(), db));
        Ok(())
    }

    /// Open a fresh in-memory database, closing any open database first
    pub fn open_in_memory(&mut self) -> Result<()> {
        self.active.take();
        let db = DatabaseConn::open_in_memory()?;
        self.active = Some((":memory:".to_string(), db));
        Ok(())
    }

    /// The active connection, or `NoDatabase` when nothing is open
    pub fn current(&self) -> Result<&DatabaseConn> {
        match &self.active {
            Some((_, db)) => Ok(db),
            None => Err(ScopeError::NoDatabase),
        }
    }

    /// Path the active database was opened from
    pub fn current_path(&self) -> Option<&str> {
        self.active.as_ref().map(|(path, _)| path.as_str())
    }

    /// File name of the active database, for export headers
    pub fn database_name(&self) -> Option<String> {
        self.current_path().map(|p| {
            Path::new(p)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.to_string())
        })
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Release the active handle; idempotent
    pub fn close(&mut self) {
        if let Some((path, _)) = self.active.take() {
            info!(path = %path, "database closed");
        }
    }
}
