use anyhow::{anyhow, Result};
use clap::Args;
use sqlscope::database::{ConnectionManager, DmlBuilder};

/// Arguments for the insert command
#[derive(Args)]
pub struct InsertArgs {
    /// Table name
    pub table: String,

    /// Column assignment, repeatable: col=value. A blank value leaves the
    /// column to its default.
    #[clap(short = 's', long = "set", value_name = "COL=VALUE", required = true)]
    pub assignments: Vec<String>,
}

pub fn run(manager: &ConnectionManager, args: &InsertArgs) -> Result<()> {
    let values = args
        .assignments
        .iter()
        .map(|assignment| {
            assignment
                .split_once('=')
                .map(|(col, value)| (col.to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("'{}' is not of the form col=value", assignment))
        })
        .collect::<Result<Vec<_>>>()?;

    let db = manager.current()?;
    DmlBuilder::new(db).insert_row(&args.table, &values)?;
    println!("row inserted into '{}'", args.table);
    Ok(())
}
