// ABOUTME: Immutable job specifications for export and restore runs
// ABOUTME: Builder validates selection, chunking, and per-table filters once

use crate::error::{BackupError, Result};
use crate::selection::TableSelection;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Rows per INSERT statement when the job does not say otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Optional per-table row restrictions applied when the dump reads data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub where_clause: Option<String>,
    pub limit: Option<u64>,
}

impl RowFilter {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_none() && self.limit.is_none()
    }
}

/// Validate a table name before it can reach a backtick-quoted query.
///
/// Accepts 1-64 characters from the unquoted-identifier set (ASCII
/// alphanumerics, underscore, dollar). Anything else is rejected so user
/// input can never smuggle quoting characters into generated SQL.
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BackupError::invalid_job("Table name cannot be empty"));
    }
    if name.len() > 64 {
        return Err(BackupError::invalid_job(format!(
            "Table name '{}' exceeds 64 characters",
            name
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        return Err(BackupError::invalid_job(format!(
            "Table name '{}' contains invalid characters",
            name
        )));
    }
    Ok(())
}

/// Parses a `table:predicate` row filter spec from the CLI.
pub fn parse_where_spec(spec: &str) -> Result<(String, String)> {
    let invalid = || {
        BackupError::invalid_job(format!(
            "Row filter must be 'table:predicate', got '{}'",
            spec
        ))
    };
    let (table, predicate) = spec.split_once(':').ok_or_else(invalid)?;
    let table = table.trim();
    let predicate = predicate.trim();
    if table.is_empty() || predicate.is_empty() {
        return Err(invalid());
    }
    Ok((table.to_string(), predicate.to_string()))
}

/// Parses a `table:count` row cap spec from the CLI.
pub fn parse_limit_spec(spec: &str) -> Result<(String, u64)> {
    let (table, count) = spec.split_once(':').ok_or_else(|| {
        BackupError::invalid_job(format!("Row limit must be 'table:count', got '{}'", spec))
    })?;
    let table = table.trim();
    if table.is_empty() {
        return Err(BackupError::invalid_job(format!(
            "Row limit must be 'table:count', got '{}'",
            spec
        )));
    }
    let limit = count.trim().parse::<u64>().map_err(|_| {
        BackupError::invalid_job(format!(
            "Row limit for '{}' must be a number, got '{}'",
            table,
            count.trim()
        ))
    })?;
    Ok((table.to_string(), limit))
}

/// A validated export specification.
///
/// Instances are immutable; build one through [`ExportJob::builder`], which
/// runs every validation exactly once. Defaults to all tables, no filters,
/// chunks of [`DEFAULT_CHUNK_SIZE`] rows.
#[derive(Debug, Clone)]
pub struct ExportJob {
    selection: TableSelection,
    filters: BTreeMap<String, RowFilter>,
    chunk_size: usize,
    timeout: Option<Duration>,
}

impl ExportJob {
    pub fn builder() -> ExportJobBuilder {
        ExportJobBuilder::default()
    }

    pub fn selection(&self) -> &TableSelection {
        &self.selection
    }

    pub fn filter_for(&self, table: &str) -> Option<&RowFilter> {
        self.filters.get(table)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for ExportJob {
    fn default() -> Self {
        Self {
            selection: TableSelection::All,
            filters: BTreeMap::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExportJobBuilder {
    include_tables: Option<Vec<String>>,
    exclude_tables: Option<Vec<String>>,
    where_clauses: BTreeMap<String, String>,
    limits: BTreeMap<String, u64>,
    chunk_size: Option<usize>,
    timeout: Option<Duration>,
}

impl ExportJobBuilder {
    pub fn include_tables(mut self, tables: Vec<String>) -> Self {
        self.include_tables = Some(tables);
        self
    }

    pub fn exclude_tables(mut self, tables: Vec<String>) -> Self {
        self.exclude_tables = Some(tables);
        self
    }

    /// Restricts `table`'s rows with a raw SQL predicate.
    pub fn where_clause(mut self, table: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.where_clauses.insert(table.into(), predicate.into());
        self
    }

    /// Caps how many rows of `table` the dump reads.
    pub fn limit_rows(mut self, table: impl Into<String>, limit: u64) -> Self {
        self.limits.insert(table.into(), limit);
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ExportJob> {
        if self.include_tables.is_some() && self.exclude_tables.is_some() {
            return Err(BackupError::invalid_job(
                "Cannot use both --include-tables and --exclude-tables",
            ));
        }

        for name in self
            .include_tables
            .iter()
            .chain(self.exclude_tables.iter())
            .flatten()
        {
            validate_table_name(name)?;
        }
        for (table, predicate) in &self.where_clauses {
            validate_table_name(table)?;
            if predicate.trim().is_empty() {
                return Err(BackupError::invalid_job(format!(
                    "Row filter for table '{}' cannot be empty",
                    table
                )));
            }
        }
        for table in self.limits.keys() {
            validate_table_name(table)?;
        }

        let chunk_size = match self.chunk_size {
            Some(0) => {
                return Err(BackupError::invalid_job("Chunk size must be at least 1"));
            }
            Some(n) => n,
            None => DEFAULT_CHUNK_SIZE,
        };

        let selection = if let Some(tables) = self.include_tables {
            TableSelection::Include(tables)
        } else if let Some(tables) = self.exclude_tables {
            TableSelection::Exclude(tables)
        } else {
            TableSelection::All
        };

        let mut filters: BTreeMap<String, RowFilter> = BTreeMap::new();
        for (table, predicate) in self.where_clauses {
            filters.entry(table).or_default().where_clause = Some(predicate);
        }
        for (table, limit) in self.limits {
            filters.entry(table).or_default().limit = Some(limit);
        }

        Ok(ExportJob {
            selection,
            filters,
            chunk_size,
            timeout: self.timeout,
        })
    }
}

/// Where a restore reads its dump from. Explicit by construction: a path is
/// never mistaken for document text, however short or long either is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpSource {
    /// The document itself, already in memory.
    Inline(String),
    /// Path to a dump file on disk.
    Path(PathBuf),
}

/// A restore specification: the dump source plus an optional deadline.
#[derive(Debug, Clone)]
pub struct RestoreJob {
    source: DumpSource,
    timeout: Option<Duration>,
}

impl RestoreJob {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: DumpSource::Path(path.into()),
            timeout: None,
        }
    }

    pub fn from_contents(document: impl Into<String>) -> Self {
        Self {
            source: DumpSource::Inline(document.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn source(&self) -> &DumpSource {
        &self.source
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Loads the document text, reading from disk when the job points at a
    /// file.
    pub fn document(&self) -> Result<String> {
        match &self.source {
            DumpSource::Inline(contents) => Ok(contents.clone()),
            DumpSource::Path(path) => Ok(fs::read_to_string(path)?),
        }
    }
}
