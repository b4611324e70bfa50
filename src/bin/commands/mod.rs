pub mod create_table;
pub mod describe;
pub mod drop_table;
pub mod exec;
pub mod export;
pub mod insert;
pub mod rows;
pub mod tables;

use sqlscope::database::QueryResult;
use sqlscope::OutputFormat;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Render string rows under a header in the requested non-JSON format
pub(crate) fn render_rows(columns: &[String], rows: &[Vec<String>], format: OutputFormat) -> String {
    match format {
        OutputFormat::Psv => {
            let mut out = columns.join("|");
            for row in rows {
                out.push('\n');
                out.push_str(&row.join("|"));
            }
            out
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(columns.to_vec());
            for row in rows {
                builder.push_record(row.clone());
            }
            let mut table = builder.build();
            match format {
                OutputFormat::Markdown => table.with(Style::markdown()),
                _ => table.with(Style::rounded()),
            };
            table.to_string()
        }
    }
}

/// Render a query result in the requested format
///
/// JSON formats emit one object per row keyed by column name; the others
/// go through the shared table renderer.
pub(crate) fn render_query_result(result: &QueryResult, format: OutputFormat) -> String {
    if format.is_json() {
        let objects: Vec<serde_json::Value> = result
            .rows
            .iter()
            .map(|row| {
                let map: serde_json::Map<String, serde_json::Value> = result
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(col, value)| {
                        (
                            col.clone(),
                            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
                        )
                    })
                    .collect();
                serde_json::Value::Object(map)
            })
            .collect();
        return match format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&objects)
                .unwrap_or_else(|_| "[]".to_string()),
            _ => serde_json::to_string(&objects).unwrap_or_else(|_| "[]".to_string()),
        };
    }

    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect();
    render_rows(&result.columns, &rows, format)
}
