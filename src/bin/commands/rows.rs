use anyhow::Result;
use sqlscope::database::{ConnectionManager, SchemaIntrospector};
use sqlscope::OutputFormat;

pub fn run(manager: &ConnectionManager, table: &str, limit: u64, format: OutputFormat) -> Result<()> {
    let db = manager.current()?;
    let result = SchemaIntrospector::new(db).fetch_rows(table, limit)?;
    println!("{}", super::render_query_result(&result, format));
    Ok(())
}
