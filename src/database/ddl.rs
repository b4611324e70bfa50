//! CREATE TABLE / DROP TABLE synthesis
//!
//! Statements are built from descriptors and executed immediately against
//! the active connection. Declared types and default expressions are
//! opaque strings handed to the engine verbatim; the engine, not this
//! builder, decides whether they are acceptable.

use tracing::info;

use crate::database::{quote_ident, ColumnDescriptor, DatabaseConn};
use crate::error::{Result, ScopeError};

/// Builds and executes schema-changing statements
pub struct DdlBuilder<'a> {
    db: &'a DatabaseConn,
}

impl<'a> DdlBuilder<'a> {
    pub fn new(db: &'a DatabaseConn) -> Self {
        DdlBuilder { db }
    }

    /// Create a table from descriptors and return the executed SQL text
    ///
    /// The `IF NOT EXISTS` guard makes the call idempotent: an existing
    /// table of the same name is left untouched and the call still
    /// succeeds. The returned string is exactly what was executed, for
    /// audit display.
    pub fn create_table(&self, name: &str, columns: &[ColumnDescriptor]) -> Result<String> {
        if name.trim().is_empty() {
            return Err(ScopeError::Validation(
                "table name must not be empty".to_string(),
            ));
        }
        if columns.is_empty() {
            return Err(ScopeError::Validation(
                "a table needs at least one column".to_string(),
            ));
        }

        let col_defs: Vec<String> = columns.iter().map(column_definition).collect();
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(name),
            col_defs.join(", ")
        );

        self.db.execute(&sql)?;
        info!(table = %name, columns = columns.len(), "table created");
        Ok(sql)
    }

    /// Drop a table; succeeds even if it never existed
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let sql = format!("DROP TABLE IF EXISTS {}", quote_ident(name));
        self.db.execute(&sql)?;
        info!(table = %name, "table dropped");
        Ok(())
    }
}

/// One column clause: `"name" TYPE [PRIMARY KEY] [NOT NULL] [DEFAULT expr]`
fn column_definition(col: &ColumnDescriptor) -> String {
    let mut def = format!("{} {}", quote_ident(&col.name), col.declared_type);
    if col.primary_key {
        def.push_str(" PRIMARY KEY");
    }
    if col.not_null {
        def.push_str(" NOT NULL");
    }
    if let Some(expr) = &col.default_expr {
        if !expr.trim().is_empty() {
            def.push_str(" DEFAULT ");
            def.push_str(expr.trim());
        }
    }
    def
}
