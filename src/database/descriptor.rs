//! Schema and result value types
//!
//! These are passive records produced by introspection, user input, or
//! statement execution. They are plain owned values: nothing here borrows
//! the live connection, so they stay usable after the handle they came
//! from is closed (though they describe the database as it was then).

use std::fmt;

use serde::Serialize;

/// A single column of a table, as declared or as discovered in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Free-form declared type token (e.g. "INTEGER", "VARCHAR(40)"),
    /// passed through to the engine verbatim
    pub declared_type: String,
    pub primary_key: bool,
    pub not_null: bool,
    /// Raw default expression text from the catalog, `None` when absent
    pub default_expr: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        ColumnDescriptor {
            name: name.into(),
            declared_type: declared_type.into(),
            primary_key: false,
            not_null: false,
            default_expr: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default_expr = Some(expr.into());
        self
    }
}

/// A table and its columns in physical declaration order
///
/// Column order is significant: it defines on-disk order and the row order
/// in both export formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// A dynamically-typed SQLite value
///
/// Mirrors SQLite's five storage classes. Owned copy of the engine value,
/// serializable for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<rusqlite::types::Value> for SqlValue {
    fn from(value: rusqlite::types::Value) -> Self {
        use rusqlite::types::Value;
        match value {
            Value::Null => SqlValue::Null,
            Value::Integer(i) => SqlValue::Integer(i),
            Value::Real(f) => SqlValue::Real(f),
            Value::Text(s) => SqlValue::Text(s),
            Value::Blob(b) => SqlValue::Blob(b),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, ""),
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Real(r) => write!(f, "{}", r),
            SqlValue::Text(s) => write!(f, "{}", s),
            SqlValue::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
        }
    }
}

/// Rows and column names produced by a single statement
///
/// `columns` is empty iff the statement produced no result set (DDL, or
/// DML without a RETURNING clause).
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl QueryResult {
    /// Marker for a statement that produced no result set
    pub fn empty() -> Self {
        QueryResult::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Outcome of a multi-statement batch
///
/// `results[i]` corresponds to statement *i* in submission order. When the
/// batch failed, `results` holds only the statements that completed before
/// the failure; their data effects were rolled back with the rest of the
/// batch, but any rows they returned are kept for diagnostic display.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub success: bool,
    pub message: String,
    pub results: Vec<QueryResult>,
}
