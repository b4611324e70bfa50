//! Error types for sqlscope
//!
//! Every library operation returns `Result<T, ScopeError>`. Engine-level
//! failures keep rusqlite's verbatim message so the caller can display
//! exactly what SQLite said.

use thiserror::Error;

/// The main error type for sqlscope
#[derive(Error, Debug)]
pub enum ScopeError {
    /// An operation that requires an open database was called with none open
    #[error("no database is open")]
    NoDatabase,

    /// The path could not be opened as a SQLite database
    #[error("failed to open database at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Caller-supplied structural input is invalid (empty name, zero columns)
    #[error("invalid input: {0}")]
    Validation(String),

    /// The engine rejected a statement; the message is SQLite's verbatim text
    #[error("{0}")]
    Statement(String),

    /// Export file write or read failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScopeError {
    /// Wrap a rusqlite error as a statement error, preserving the engine's
    /// own message text.
    pub fn statement(err: rusqlite::Error) -> Self {
        ScopeError::Statement(err.to_string())
    }
}

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, ScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_message_is_verbatim() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("NOT NULL constraint failed: users.name".to_string()),
        );
        let wrapped = ScopeError::statement(err);
        assert_eq!(
            wrapped.to_string(),
            "NOT NULL constraint failed: users.name"
        );
    }

    #[test]
    fn test_no_database_display() {
        assert_eq!(ScopeError::NoDatabase.to_string(), "no database is open");
    }
}
