#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! sqlscope - a SQLite schema inspection and export toolkit
//!
//! sqlscope opens a SQLite database file, inspects and modifies its schema
//! and rows, executes multi-statement SQL batches atomically, and
//! regenerates two derived artifacts from the live schema: a canonical DDL
//! script and a draw.io diagram document. It can be used as both a
//! command-line application and a library.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - **[`database`]**: engine-facing functionality
//!   - `connection`: the `DatabaseConn` wrapper and the single-handle
//!     `ConnectionManager` lifecycle (open/close/current)
//!   - `descriptor`: passive schema and result records
//!   - `introspect`: live catalog queries
//!   - `ddl` / `dml`: schema-driven statement synthesis
//!   - `batch`: transactional multi-statement execution
//!
//! - **[`export`]**: derived artifacts
//!   - `sql`: whole-database DDL script, verbatim catalog text
//!   - `diagram`: draw.io table/row layout with position-derived ids
//!
//! - **[`config`]**: configuration management
//! - **[`output`]**: CLI output format vocabulary
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sqlscope::database::{ConnectionManager, DdlBuilder, SchemaIntrospector};
//! use sqlscope::export::SchemaExporter;
//!
//! let mut manager = ConnectionManager::new();
//! manager.open("app.db")?;
//!
//! let db = manager.current()?;
//! for table in SchemaIntrospector::new(db).list_tables()? {
//!     println!("{}", table);
//! }
//!
//! let script = SchemaExporter::new(&manager).export_ddl()?;
//! std::fs::write("schema.sql", script)?;
//! ```
//!
//! Exactly one database is open at a time; every operation that needs one
//! fails with [`error::ScopeError::NoDatabase`] when nothing is open. All
//! operations are synchronous and blocking, and nothing is cached: each
//! introspection call re-queries the live catalog.

pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod output;

pub use config::ScopeConfig;
pub use database::{
    split_statements, BatchExecutor, BatchOutcome, ColumnDescriptor, ConnectionManager,
    DatabaseConn, DdlBuilder, DmlBuilder, QueryResult, SchemaIntrospector, SqlValue,
    TableDescriptor,
};
pub use error::ScopeError;
pub use export::{write_export, DiagramExporter, SchemaExporter};
pub use output::OutputFormat;
