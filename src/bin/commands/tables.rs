use anyhow::Result;
use sqlscope::database::{ConnectionManager, SchemaIntrospector};
use sqlscope::OutputFormat;

pub fn run(manager: &ConnectionManager, format: OutputFormat) -> Result<()> {
    let db = manager.current()?;
    let tables = SchemaIntrospector::new(db).list_tables()?;

    if format.is_json() {
        let json = if format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(&tables)?
        } else {
            serde_json::to_string(&tables)?
        };
        println!("{json}");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = tables.iter().map(|t| vec![t.clone()]).collect();
    println!(
        "{}",
        super::render_rows(&["table".to_string()], &rows, format)
    );
    Ok(())
}
