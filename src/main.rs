// ABOUTME: CLI entry point for mysql-simple-backup
// ABOUTME: Parses commands and routes to appropriate handlers

use clap::{Parser, Subcommand};
use mysql_simple_backup::commands::{self, ExportOptions, RestoreOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mysql-simple-backup")]
#[command(about = "Logical MySQL backup and restore with chunked INSERT dumps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a database as a SQL dump file
    Export {
        #[arg(long)]
        url: String,
        /// Output file path (defaults to a timestamped name in the working directory)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Include only these tables (comma-separated)
        #[arg(long, value_delimiter = ',')]
        include_tables: Option<Vec<String>>,
        /// Exclude these tables (comma-separated)
        #[arg(long, value_delimiter = ',')]
        exclude_tables: Option<Vec<String>>,
        /// Restrict a table's rows (format: table:predicate, repeatable)
        #[arg(long = "where", value_name = "TABLE:PREDICATE")]
        where_specs: Vec<String>,
        /// Cap how many rows of a table are dumped (format: table:count, repeatable)
        #[arg(long = "limit", value_name = "TABLE:COUNT")]
        limit_specs: Vec<String>,
        /// Rows per INSERT statement (default 100)
        #[arg(long)]
        chunk_size: Option<usize>,
        /// TOML config file with selection and row filters
        #[arg(long)]
        config: Option<PathBuf>,
        /// Abort the export after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Interactive mode for selecting tables
        #[arg(long)]
        interactive: bool,
    },
    /// Restore a SQL dump file into a database
    Restore {
        #[arg(long)]
        url: String,
        /// Dump file to replay
        #[arg(long)]
        file: PathBuf,
        /// Abort the restore after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// List the database's tables with column and row counts
    Tables {
        #[arg(long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - default to INFO level if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            url,
            output,
            include_tables,
            exclude_tables,
            where_specs,
            limit_specs,
            chunk_size,
            config,
            timeout_secs,
            interactive,
        } => {
            commands::export(ExportOptions {
                url,
                output,
                include_tables,
                exclude_tables,
                where_specs,
                limit_specs,
                chunk_size,
                config,
                timeout_secs,
                interactive,
            })
            .await
        }
        Commands::Restore {
            url,
            file,
            timeout_secs,
        } => {
            commands::restore(RestoreOptions {
                url,
                file,
                timeout_secs,
            })
            .await
        }
        Commands::Tables { url } => commands::tables(&url).await,
    }
}
