use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use sqlscope::database::ConnectionManager;
use sqlscope::export::{write_export, DiagramExporter, SchemaExporter};
use sqlscope::ScopeConfig;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Write the canonical DDL script (.sql)
    Ddl {
        /// Output path; defaults to <export_dir>/<db>.schema.sql
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the draw.io schema diagram (.drawio)
    Diagram {
        /// Output path; defaults to <export_dir>/<db>.schema.drawio
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(manager: &ConnectionManager, command: &ExportCommands, config: &ScopeConfig) -> Result<()> {
    let (contents, path) = match command {
        ExportCommands::Ddl { output } => (
            SchemaExporter::new(manager).export_ddl()?,
            output
                .clone()
                .unwrap_or_else(|| default_path(manager, config, "schema.sql")),
        ),
        ExportCommands::Diagram { output } => (
            DiagramExporter::new(manager).export_diagram()?,
            output
                .clone()
                .unwrap_or_else(|| default_path(manager, config, "schema.drawio")),
        ),
    };

    write_export(&path, &contents)?;
    println!("exported to {}", path.display());
    Ok(())
}

fn default_path(manager: &ConnectionManager, config: &ScopeConfig, suffix: &str) -> PathBuf {
    let base = manager
        .database_name()
        .unwrap_or_else(|| "database".to_string());
    PathBuf::from(&config.export_dir).join(format!("{base}.{suffix}"))
}
