// ABOUTME: Export command: connects, builds the job, generates and writes the dump
// ABOUTME: Merges config file settings with CLI flags, CLI winning on conflicts

use crate::config::{self, ExportConfig};
use crate::dump::generate_dump_with_progress;
use crate::interactive;
use crate::job::{parse_limit_spec, parse_where_spec, ExportJob};
use crate::mysql::MysqlConnection;
use crate::selection::TableSelection;
use crate::sink;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Everything the export command needs, straight from the CLI.
pub struct ExportOptions {
    pub url: String,
    pub output: Option<PathBuf>,
    pub include_tables: Option<Vec<String>>,
    pub exclude_tables: Option<Vec<String>>,
    pub where_specs: Vec<String>,
    pub limit_specs: Vec<String>,
    pub chunk_size: Option<usize>,
    pub config: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub interactive: bool,
}

/// Export the connected database as a SQL dump file.
///
/// Builds an [`ExportJob`] from the config file and CLI flags, streams every
/// selected table into a dump document, and writes it atomically to the
/// output path (or a timestamped default name in the working directory).
pub async fn export(opts: ExportOptions) -> Result<()> {
    tracing::info!("Starting export...");

    let file_config = match &opts.config {
        Some(path) => config::load_export_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ExportConfig::default(),
    };

    let mut conn = MysqlConnection::connect(&opts.url)
        .await
        .context("Failed to connect to MySQL")?;
    let database = conn.database().to_string();
    tracing::info!("✓ Connected to database '{}'", database);

    // CLI flags win over the config file.
    let include_tables = opts.include_tables.or(file_config.include_tables);
    let exclude_tables = opts.exclude_tables.or(file_config.exclude_tables);
    let chunk_size = opts.chunk_size.or(file_config.chunk_size);

    let mut builder = ExportJob::builder();

    if opts.interactive {
        match interactive::select_tables(&mut conn, &database).await? {
            TableSelection::Include(tables) => builder = builder.include_tables(tables),
            TableSelection::Exclude(tables) => builder = builder.exclude_tables(tables),
            TableSelection::All => {}
        }
    } else {
        if let Some(tables) = include_tables {
            builder = builder.include_tables(tables);
        }
        if let Some(tables) = exclude_tables {
            builder = builder.exclude_tables(tables);
        }
    }

    for filter in file_config.table_filters {
        if let Some(predicate) = filter.predicate {
            builder = builder.where_clause(filter.table.clone(), predicate);
        }
        if let Some(limit) = filter.limit {
            builder = builder.limit_rows(filter.table, limit);
        }
    }
    for spec in &opts.where_specs {
        let (table, predicate) = parse_where_spec(spec)?;
        builder = builder.where_clause(table, predicate);
    }
    for spec in &opts.limit_specs {
        let (table, limit) = parse_limit_spec(spec)?;
        builder = builder.limit_rows(table, limit);
    }

    if let Some(chunk_size) = chunk_size {
        builder = builder.chunk_size(chunk_size);
    }
    if let Some(secs) = opts.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let job = builder.build()?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=> "),
    );

    let result = super::with_timeout(
        job.timeout(),
        generate_dump_with_progress(&mut conn, &database, &job, |table, done, total| {
            progress.set_length(total as u64);
            progress.set_position(done as u64);
            progress.set_message(table.to_string());
        }),
    )
    .await;

    progress.finish_and_clear();

    let document = result.context("Export failed")?;

    let output_path = opts
        .output
        .unwrap_or_else(|| PathBuf::from(sink::default_export_name(&database)));

    sink::write_to_path(&document, &output_path)
        .with_context(|| format!("Failed to write dump to {}", output_path.display()))?;

    if let Err(e) = conn.disconnect().await {
        tracing::debug!("Error closing connection: {}", e);
    }

    tracing::info!(
        "✓ Exported {} table(s) from '{}' to {}",
        document.table_count(),
        database,
        output_path.display()
    );

    Ok(())
}
