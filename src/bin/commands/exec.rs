use anyhow::{anyhow, Result};
use clap::Args;
use sqlscope::database::{BatchExecutor, ConnectionManager};
use sqlscope::OutputFormat;

/// Arguments for the exec command
#[derive(Args)]
pub struct ExecArgs {
    /// SQL text: zero or more semicolon-separated statements
    #[clap(conflicts_with = "file")]
    pub sql: Option<String>,

    /// Read the SQL batch from a file instead
    #[clap(short = 'F', long)]
    pub file: Option<String>,
}

pub fn run(manager: &ConnectionManager, args: &ExecArgs, format: OutputFormat) -> Result<()> {
    let text = match (&args.sql, &args.file) {
        (Some(sql), None) => sql.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        _ => return Err(anyhow!("provide SQL text or --file, not both or neither")),
    };

    let db = manager.current()?;
    let outcome = BatchExecutor::new(db).execute_batch(&text)?;

    for (index, result) in outcome.results.iter().enumerate() {
        if result.is_empty() {
            println!("-- statement {}: ok", index + 1);
        } else {
            println!("-- statement {}:", index + 1);
            println!("{}", super::render_query_result(result, format));
        }
    }
    if !outcome.success {
        // The batch rolled back; mirror that in the exit code
        return Err(anyhow!("batch failed and rolled back: {}", outcome.message));
    }
    println!("{}", outcome.message);
    Ok(())
}
