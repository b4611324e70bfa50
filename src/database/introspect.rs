//! Live catalog introspection
//!
//! Reads table and column metadata out of `sqlite_master` and the
//! `table_info` pragma. Nothing is cached; each call reflects the catalog
//! at the moment it runs.

use rusqlite::types::Value;
use tracing::debug;

use crate::database::{quote_ident, ColumnDescriptor, DatabaseConn, QueryResult, TableDescriptor};
use crate::error::{Result, ScopeError};

/// Read-only view over the active database's catalog
pub struct SchemaIntrospector<'a> {
    db: &'a DatabaseConn,
}

impl<'a> SchemaIntrospector<'a> {
    pub fn new(db: &'a DatabaseConn) -> Self {
        SchemaIntrospector { db }
    }

    /// All user table names in ascending lexicographic order
    ///
    /// The ordering is load-bearing: both exporters iterate this list, and
    /// their output must be byte-stable for an unchanged schema. SQLite's
    /// own `sqlite_%` bookkeeping tables are not user tables and are
    /// filtered out.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .db
            .conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type='table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(ScopeError::statement)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(ScopeError::statement)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(ScopeError::statement)?;
        Ok(names)
    }

    /// Column metadata for `name`, in physical column order
    ///
    /// `primary_key` is true iff the column participates in the table's
    /// primary key; `default_expr` is the catalog's raw expression text.
    pub fn describe_table(&self, name: &str) -> Result<Vec<ColumnDescriptor>> {
        if !self.db.table_exists(name)? {
            return Err(ScopeError::Statement(format!("no such table: {}", name)));
        }
        let sql = format!("PRAGMA table_info({})", quote_ident(name));
        let mut stmt = self.db.conn.prepare(&sql).map_err(ScopeError::statement)?;
        // table_info columns: cid, name, type, notnull, dflt_value, pk
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnDescriptor {
                    name: row.get::<_, String>(1)?,
                    declared_type: row.get::<_, String>(2)?,
                    not_null: row.get::<_, i64>(3)? != 0,
                    default_expr: row.get::<_, Option<String>>(4)?,
                    primary_key: row.get::<_, i64>(5)? != 0,
                })
            })
            .map_err(ScopeError::statement)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(ScopeError::statement)?;
        Ok(columns)
    }

    /// The full descriptor for one table
    pub fn table(&self, name: &str) -> Result<TableDescriptor> {
        Ok(TableDescriptor {
            name: name.to_string(),
            columns: self.describe_table(name)?,
        })
    }

    /// Up to `limit` rows of `name` in the engine's natural scan order
    ///
    /// The limit is enforced by the engine through a bound parameter, not
    /// by truncating a larger result client-side. Column names come from
    /// the prepared statement, so an empty table still reports them.
    pub fn fetch_rows(&self, name: &str, limit: u64) -> Result<QueryResult> {
        if limit == 0 {
            return Err(ScopeError::Validation(
                "row limit must be a positive integer".to_string(),
            ));
        }
        let sql = format!("SELECT * FROM {} LIMIT ?1", quote_ident(name));
        let mut stmt = self.db.conn.prepare(&sql).map_err(ScopeError::statement)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let column_count = columns.len();

        let mut rows_out = Vec::new();
        let mut rows = stmt
            .query([limit as i64])
            .map_err(ScopeError::statement)?;
        while let Some(row) = rows.next().map_err(ScopeError::statement)? {
            let mut tuple = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                let value: Value = row.get(idx).map_err(ScopeError::statement)?;
                tuple.push(value.into());
            }
            rows_out.push(tuple);
        }

        debug!(table = %name, rows = rows_out.len(), "fetched rows");
        Ok(QueryResult {
            columns,
            rows: rows_out,
        })
    }

    /// The exact `CREATE TABLE` text the engine stored for `name`
    ///
    /// Returned verbatim, not re-synthesized, so hand-written syntax the
    /// catalog kept (CHECK constraints, UNIQUE, comments) survives into
    /// the DDL export.
    pub fn table_ddl(&self, name: &str) -> Result<String> {
        self.db
            .conn
            .query_row(
                "SELECT sql FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get::<_, String>(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    ScopeError::Statement(format!("no such table: {}", name))
                }
                other => ScopeError::statement(other),
            })
    }
}
