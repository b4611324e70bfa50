//! Multi-statement batch execution
//!
//! A batch is raw SQL text holding zero or more `;`-terminated statements.
//! All of it runs inside one transaction: either every statement commits
//! or none of their effects persist. Results are captured per statement so
//! the caller can show row output and pinpoint a failure.

use rusqlite::types::Value;
use tracing::{debug, warn};

use crate::database::{BatchOutcome, DatabaseConn, QueryResult};
use crate::error::{Result, ScopeError};

/// Split raw SQL text into statements
///
/// Splits on literal `;` and drops fragments that are empty after
/// trimming. A `;` inside a quoted string literal or a comment is not
/// protected, so such statements mis-split; well-formed simple batches
/// split correctly. Upgrading to a lexical splitter must keep this
/// function's behavior for those simple batches.
pub fn split_statements(text: &str) -> Vec<&str> {
    text.split(';')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Executes batches against the active connection
///
/// Statements run sequentially in submission order. The connection is not
/// safe for overlapping write transactions, so a batch never runs
/// concurrently with another on the same handle.
pub struct BatchExecutor<'a> {
    db: &'a DatabaseConn,
}

impl<'a> BatchExecutor<'a> {
    pub fn new(db: &'a DatabaseConn) -> Self {
        BatchExecutor { db }
    }

    /// Run every statement in `text` under one transaction
    ///
    /// On the first failing statement the transaction rolls back, no
    /// partial effect persists, and the outcome carries the engine's
    /// verbatim error plus the results captured before the failure (their
    /// data effects are undone; any rows they returned remain informative
    /// for diagnostics). On full success the transaction commits and
    /// `results[i]` is statement *i*'s result set, or an empty marker for
    /// non-query statements.
    pub fn execute_batch(&self, text: &str) -> Result<BatchOutcome> {
        let statements = split_statements(text);
        let tx = self.db.transaction()?;

        let mut results: Vec<QueryResult> = Vec::with_capacity(statements.len());
        for (index, statement) in statements.iter().enumerate() {
            match run_statement(&tx, statement) {
                Ok(result) => results.push(result),
                Err(err) => {
                    // Dropping the transaction without commit rolls back
                    warn!(statement = index + 1, error = %err, "batch aborted");
                    drop(tx);
                    return Ok(BatchOutcome {
                        success: false,
                        message: err.to_string(),
                        results,
                    });
                }
            }
        }

        tx.commit().map_err(ScopeError::statement)?;
        debug!(statements = statements.len(), "batch committed");
        Ok(BatchOutcome {
            success: true,
            message: format!("{} statements executed", statements.len()),
            results,
        })
    }
}

/// Execute one statement, capturing its result set if it has one
fn run_statement(conn: &rusqlite::Connection, sql: &str) -> Result<QueryResult> {
    let mut stmt = conn.prepare(sql).map_err(ScopeError::statement)?;
    if stmt.column_count() == 0 {
        stmt.execute([]).map_err(ScopeError::statement)?;
        return Ok(QueryResult::empty());
    }

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();
    let mut rows_out = Vec::new();
    let mut rows = stmt.query([]).map_err(ScopeError::statement)?;
    while let Some(row) = rows.next().map_err(ScopeError::statement)? {
        let mut tuple = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            let value: Value = row.get(idx).map_err(ScopeError::statement)?;
            tuple.push(value.into());
        }
        rows_out.push(tuple);
    }
    Ok(QueryResult {
        columns,
        rows: rows_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SqlValue;

    fn users_db() -> DatabaseConn {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
            .unwrap();
        db
    }

    #[test]
    fn test_split_simple() {
        let stmts = split_statements("SELECT 1; SELECT 2;\n\nSELECT 3");
        assert_eq!(stmts, vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
    }

    #[test]
    fn test_split_drops_blank_fragments() {
        assert!(split_statements("  ;;\n;  ").is_empty());
        assert!(split_statements("").is_empty());
    }

    #[test]
    fn test_batch_success_result_per_statement() {
        let db = users_db();
        let executor = BatchExecutor::new(&db);
        let outcome = executor
            .execute_batch(
                "INSERT INTO users (name) VALUES ('Ada');\
                 SELECT name FROM users;\
                 INSERT INTO users (name) VALUES ('Grace');",
            )
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.message, "3 statements executed");
        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.results[0].is_empty());
        assert_eq!(outcome.results[1].columns, vec!["name"]);
        assert_eq!(
            outcome.results[1].rows[0][0],
            SqlValue::Text("Ada".to_string())
        );
        assert!(outcome.results[2].is_empty());
    }

    #[test]
    fn test_batch_failure_rolls_back_everything() {
        let db = users_db();
        let executor = BatchExecutor::new(&db);
        let outcome = executor
            .execute_batch(
                "INSERT INTO users (name) VALUES ('X');\
                 INSERT INTO users (name) VALUES (NULL);",
            )
            .unwrap();

        assert!(!outcome.success);
        assert!(outcome.message.contains("NOT NULL constraint failed"));
        // Only the pre-failure statement has a captured result
        assert_eq!(outcome.results.len(), 1);

        // The first insert's data effect did not survive the rollback
        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_batch_stops_at_first_failure() {
        let db = users_db();
        let executor = BatchExecutor::new(&db);
        let outcome = executor
            .execute_batch(
                "SELECT 1;\
                 SELECT * FROM missing_table;\
                 INSERT INTO users (name) VALUES ('never');",
            )
            .unwrap();

        assert!(!outcome.success);
        assert!(outcome.message.contains("no such table"));
        assert_eq!(outcome.results.len(), 1);
        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_pre_failure_rows_stay_informative() {
        let db = users_db();
        db.execute("INSERT INTO users (name) VALUES ('existing')")
            .unwrap();
        let executor = BatchExecutor::new(&db);
        let outcome = executor
            .execute_batch("SELECT name FROM users; SELECT * FROM missing;")
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(
            outcome.results[0].rows[0][0],
            SqlValue::Text("existing".to_string())
        );
    }

    #[test]
    fn test_empty_batch() {
        let db = users_db();
        let executor = BatchExecutor::new(&db);
        let outcome = executor.execute_batch("   \n  ").unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "0 statements executed");
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_ddl_and_dml_mix_commits_together() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let executor = BatchExecutor::new(&db);
        let outcome = executor
            .execute_batch(
                "CREATE TABLE pets (name TEXT);\
                 INSERT INTO pets VALUES ('rex');\
                 SELECT COUNT(*) AS n FROM pets;",
            )
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.results[2].rows[0][0], SqlValue::Integer(1));
        assert!(db.table_exists("pets").unwrap());
    }
}
