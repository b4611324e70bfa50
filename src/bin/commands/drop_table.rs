use anyhow::Result;
use sqlscope::database::{ConnectionManager, DdlBuilder};

pub fn run(manager: &ConnectionManager, table: &str) -> Result<()> {
    let db = manager.current()?;
    DdlBuilder::new(db).drop_table(table)?;
    println!("table '{table}' dropped (if it existed)");
    Ok(())
}
