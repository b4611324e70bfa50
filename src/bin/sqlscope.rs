use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlscope::database::ConnectionManager;
use sqlscope::{OutputFormat, ScopeConfig};
use tracing::Level;

mod commands;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.sqlscope.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, psv
    #[clap(short, long, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Path of the SQLite database file to open (created if absent)
    #[clap(short, long, conflicts_with = "in_memory")]
    db: Option<String>,

    /// Work on a throwaway in-memory database
    #[clap(long)]
    in_memory: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all user tables
    Tables,

    /// Show the columns of a table
    Describe {
        /// Table name
        table: String,
    },

    /// Fetch rows from a table
    Rows {
        /// Table name
        table: String,

        /// Maximum number of rows to fetch (default from configuration)
        #[clap(short, long)]
        limit: Option<u64>,
    },

    /// Create a table from column specs
    CreateTable(commands::create_table::CreateTableArgs),

    /// Drop a table (succeeds even if it does not exist)
    DropTable {
        /// Table name
        table: String,
    },

    /// Insert a row; blank values fall back to column defaults
    Insert(commands::insert::InsertArgs),

    /// Execute a batch of semicolon-separated SQL statements atomically
    Exec(commands::exec::ExecArgs),

    /// Export a derived artifact from the live schema
    Export {
        #[clap(subcommand)]
        command: commands::export::ExportCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
    }

    let config = match ScopeConfig::new(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &ScopeConfig) -> Result<()> {
    let mut manager = ConnectionManager::new();
    if cli.in_memory {
        manager.open_in_memory()?;
    } else if let Some(path) = &cli.db {
        manager.open(path)?;
    }
    // With neither --db nor --in-memory, commands fail with the library's
    // "no database is open" error; clap help remains usable either way.

    match &cli.command {
        Commands::Tables => commands::tables::run(&manager, cli.format),
        Commands::Describe { table } => commands::describe::run(&manager, table, cli.format),
        Commands::Rows { table, limit } => commands::rows::run(
            &manager,
            table,
            limit.unwrap_or(config.default_row_limit),
            cli.format,
        ),
        Commands::CreateTable(args) => commands::create_table::run(&manager, args),
        Commands::DropTable { table } => commands::drop_table::run(&manager, table),
        Commands::Insert(args) => commands::insert::run(&manager, args),
        Commands::Exec(args) => commands::exec::run(&manager, args, cli.format),
        Commands::Export { command } => commands::export::run(&manager, command, config),
    }
}
