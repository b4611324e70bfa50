use anyhow::Result;
use sqlscope::database::{ConnectionManager, SchemaIntrospector};
use sqlscope::OutputFormat;

pub fn run(manager: &ConnectionManager, table: &str, format: OutputFormat) -> Result<()> {
    let db = manager.current()?;
    let columns = SchemaIntrospector::new(db).describe_table(table)?;

    if format.is_json() {
        let json = if format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(&columns)?
        } else {
            serde_json::to_string(&columns)?
        };
        println!("{json}");
        return Ok(());
    }

    let header = vec![
        "column".to_string(),
        "type".to_string(),
        "pk".to_string(),
        "not_null".to_string(),
        "default".to_string(),
    ];
    let rows: Vec<Vec<String>> = columns
        .iter()
        .map(|col| {
            vec![
                col.name.clone(),
                col.declared_type.clone(),
                if col.primary_key { "yes" } else { "" }.to_string(),
                if col.not_null { "yes" } else { "" }.to_string(),
                col.default_expr.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", super::render_rows(&header, &rows, format));
    Ok(())
}
