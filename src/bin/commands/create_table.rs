use anyhow::{anyhow, Result};
use clap::Args;
use sqlscope::database::{ColumnDescriptor, ConnectionManager, DdlBuilder};

/// Arguments for the create-table command
#[derive(Args)]
pub struct CreateTableArgs {
    /// Table name
    pub table: String,

    /// Column spec, repeatable: name:TYPE[:pk][:notnull][:default=EXPR]
    #[clap(short = 'c', long = "column", value_name = "SPEC", required = true)]
    pub columns: Vec<String>,
}

pub fn run(manager: &ConnectionManager, args: &CreateTableArgs) -> Result<()> {
    let columns = args
        .columns
        .iter()
        .map(|spec| parse_column_spec(spec))
        .collect::<Result<Vec<_>>>()?;

    let db = manager.current()?;
    let sql = DdlBuilder::new(db).create_table(&args.table, &columns)?;
    println!("{sql}");
    Ok(())
}

/// Parse one `name:TYPE[:pk][:notnull][:default=EXPR]` spec
///
/// The default expression is the tail of the spec, so it may itself
/// contain `:` (e.g. `default=strftime('%H:%M','now')`).
fn parse_column_spec(spec: &str) -> Result<ColumnDescriptor> {
    let (head, default_expr) = match spec.find(":default=") {
        Some(pos) => (&spec[..pos], Some(&spec[pos + ":default=".len()..])),
        None => (spec, None),
    };

    let mut parts = head.split(':');
    let name = parts
        .next()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| anyhow!("column spec '{}' is missing a name", spec))?;
    let declared_type = parts
        .next()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| anyhow!("column spec '{}' is missing a type", spec))?;

    let mut column = ColumnDescriptor::new(name.trim(), declared_type.trim());
    for flag in parts {
        match flag.trim().to_lowercase().as_str() {
            "pk" | "primary-key" => column.primary_key = true,
            "notnull" | "not-null" => column.not_null = true,
            other => return Err(anyhow!("unknown column flag '{}' in '{}'", other, spec)),
        }
    }
    if let Some(expr) = default_expr {
        column.default_expr = Some(expr.to_string());
    }
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_spec() {
        let col = parse_column_spec("name:TEXT").unwrap();
        assert_eq!(col.name, "name");
        assert_eq!(col.declared_type, "TEXT");
        assert!(!col.primary_key);
        assert!(!col.not_null);
    }

    #[test]
    fn test_flags_and_default() {
        let col = parse_column_spec("id:INTEGER:pk:notnull:default=0").unwrap();
        assert!(col.primary_key);
        assert!(col.not_null);
        assert_eq!(col.default_expr.as_deref(), Some("0"));
    }

    #[test]
    fn test_default_keeps_colons() {
        let col = parse_column_spec("ts:TEXT:default=strftime('%H:%M','now')").unwrap();
        assert_eq!(col.default_expr.as_deref(), Some("strftime('%H:%M','now')"));
    }

    #[test]
    fn test_bad_specs() {
        assert!(parse_column_spec("justaname").is_err());
        assert!(parse_column_spec("name:TEXT:bogus").is_err());
        assert!(parse_column_spec(":TEXT").is_err());
    }
}
