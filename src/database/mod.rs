//! Database module
//!
//! All engine-facing functionality for sqlscope:
//!
//! ```text
//! database/
//! ├── connection   # DatabaseConn wrapper and the single-handle ConnectionManager
//! ├── descriptor   # ColumnDescriptor, TableDescriptor, QueryResult, BatchOutcome
//! ├── introspect   # Live catalog queries (tables, columns, rows, stored DDL)
//! ├── ddl          # CREATE TABLE / DROP TABLE synthesis and execution
//! ├── dml          # Parameterized INSERT synthesis and execution
//! └── batch        # Multi-statement execution under one transaction
//! ```
//!
//! The builders and the introspector borrow the active `DatabaseConn` from
//! the `ConnectionManager` for the duration of one call; they never hold
//! the handle across calls and never cache catalog state. Every
//! introspection call re-queries the live catalog, trading a little cost
//! for always-current results.

pub mod batch;
pub mod connection;
pub mod ddl;
pub mod descriptor;
pub mod dml;
pub mod introspect;

pub use batch::{split_statements, BatchExecutor};
pub use connection::{ConnectionManager, DatabaseConn};
pub use ddl::DdlBuilder;
pub use descriptor::{BatchOutcome, ColumnDescriptor, QueryResult, SqlValue, TableDescriptor};
pub use dml::DmlBuilder;
pub use introspect::SchemaIntrospector;

/// Quote an identifier for embedding in SQL text
///
/// Doubles embedded quote characters per SQLite's quoting rules. Used for
/// table and column names; declared types and default expressions are
/// never quoted (they pass through verbatim).
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(quote_ident("users"), "\"users\"");
    }

    #[test]
    fn test_quote_ident_embedded_quote() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
