//! Derived-artifact generation
//!
//! Both exporters are pure functions of the live catalog: the DDL script
//! replays the engine's stored `CREATE TABLE` text, and the diagram lays
//! tables out by a fixed packing rule with position-derived node ids.
//! Re-running either on an unmodified database yields byte-identical
//! output.

pub mod diagram;
pub mod sql;

pub use diagram::DiagramExporter;
pub use sql::SchemaExporter;

use std::path::Path;

use crate::error::Result;

/// Write export text to disk as UTF-8
///
/// Thin convenience for the caller-facing layer; failures surface as I/O
/// errors rather than being retried.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");
        write_export(&path, "-- empty\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "-- empty\n");
    }

    #[test]
    fn test_write_export_bad_path() {
        let err = write_export(Path::new("/nonexistent/dir/schema.sql"), "x").unwrap_err();
        assert!(matches!(err, crate::error::ScopeError::Io(_)));
    }
}
