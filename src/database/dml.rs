//! Parameterized INSERT synthesis
//!
//! Row values arrive as an ordered column-to-text mapping from the caller
//! (a form, a CLI flag list). Values are always bound as parameters, never
//! spliced into the SQL text, so content cannot change the statement's
//! shape.

use tracing::debug;

use crate::database::{quote_ident, DatabaseConn};
use crate::error::Result;

/// Builds and executes row-insertion statements
pub struct DmlBuilder<'a> {
    db: &'a DatabaseConn,
}

impl<'a> DmlBuilder<'a> {
    pub fn new(db: &'a DatabaseConn) -> Self {
        DmlBuilder { db }
    }

    /// Insert one row into `table`
    ///
    /// Entries whose value trims to the empty string are dropped from the
    /// statement entirely, so the column falls back to its default or to
    /// null instead of receiving an empty-string literal. Remaining
    /// columns keep the mapping's order. If every entry is blank the
    /// zero-column statement is still built and handed to the engine;
    /// whether a zero-column insert is acceptable is the engine's call
    /// and its verdict propagates unchanged.
    pub fn insert_row(&self, table: &str, values: &[(String, String)]) -> Result<()> {
        let filled: Vec<(&str, &str)> = values
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(col, value)| (col.as_str(), value.as_str()))
            .collect();

        let cols = filled
            .iter()
            .map(|(col, _)| quote_ident(col))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = filled
            .iter()
            .map(|_| "?")
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            cols,
            placeholders
        );

        let params = rusqlite::params_from_iter(filled.iter().map(|(_, value)| *value));
        self.db.execute_with_params(&sql, params)?;
        debug!(table = %table, columns = filled.len(), "row inserted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{ColumnDescriptor, DdlBuilder, SchemaIntrospector, SqlValue};
    use crate::error::ScopeError;

    fn users_db() -> DatabaseConn {
        let db = DatabaseConn::open_in_memory().unwrap();
        DdlBuilder::new(&db)
            .create_table(
                "users",
                &[
                    ColumnDescriptor::new("id", "INTEGER").primary_key(),
                    ColumnDescriptor::new("name", "TEXT").not_null(),
                    ColumnDescriptor::new("age", "INTEGER").default_expr("0"),
                ],
            )
            .unwrap();
        db
    }

    #[test]
    fn test_blank_values_fall_back_to_default() {
        let db = users_db();
        let builder = DmlBuilder::new(&db);
        builder
            .insert_row(
                "users",
                &[
                    ("name".to_string(), "Ada".to_string()),
                    ("age".to_string(), "".to_string()),
                ],
            )
            .unwrap();

        let result = SchemaIntrospector::new(&db).fetch_rows("users", 10).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0][1], SqlValue::Text("Ada".to_string()));
        // Blank age was excluded, so the declared default applied
        assert_eq!(result.rows[0][2], SqlValue::Integer(0));
    }

    #[test]
    fn test_values_are_bound_not_interpolated() {
        let db = users_db();
        let builder = DmlBuilder::new(&db);
        let hostile = "Robert'); DROP TABLE users; --";
        builder
            .insert_row("users", &[("name".to_string(), hostile.to_string())])
            .unwrap();

        assert!(db.table_exists("users").unwrap());
        let result = SchemaIntrospector::new(&db).fetch_rows("users", 10).unwrap();
        assert_eq!(result.rows[0][1], SqlValue::Text(hostile.to_string()));
    }

    #[test]
    fn test_constraint_violation_is_verbatim() {
        let db = users_db();
        let builder = DmlBuilder::new(&db);
        // name is NOT NULL and has no default; omitting it must fail
        let err = builder
            .insert_row("users", &[("age".to_string(), "30".to_string())])
            .unwrap_err();
        match err {
            ScopeError::Statement(msg) => assert!(msg.contains("NOT NULL constraint failed")),
            other => panic!("expected Statement error, got {:?}", other),
        }
    }

    #[test]
    fn test_all_blank_values_build_zero_column_insert() {
        let db = users_db();
        let builder = DmlBuilder::new(&db);
        // SQLite rejects `INSERT INTO t () VALUES ()`; that verdict is the
        // engine's, surfaced as a statement error
        let err = builder
            .insert_row("users", &[("name".to_string(), "   ".to_string())])
            .unwrap_err();
        assert!(matches!(err, ScopeError::Statement(_)));
    }

    #[test]
    fn test_insertion_order_is_mapping_order() {
        let db = users_db();
        let builder = DmlBuilder::new(&db);
        builder
            .insert_row(
                "users",
                &[
                    ("age".to_string(), "36".to_string()),
                    ("name".to_string(), "Grace".to_string()),
                ],
            )
            .unwrap();
        let result = SchemaIntrospector::new(&db).fetch_rows("users", 10).unwrap();
        assert_eq!(result.rows[0][1], SqlValue::Text("Grace".to_string()));
        assert_eq!(result.rows[0][2], SqlValue::Integer(36));
    }
}
