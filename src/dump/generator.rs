// ABOUTME: Builds the textual dump document from a live connection
// ABOUTME: Emits header, idempotent schema, chunked INSERT data, and trailer

use crate::catalog;
use crate::connection::Connection;
use crate::dump::escape::{idempotent_create, render_tuple};
use crate::error::Result;
use crate::job::ExportJob;

/// A finished dump plus the metadata the delivery layer cares about.
#[derive(Debug, Clone)]
pub struct DumpDocument {
    database: String,
    table_count: usize,
    contents: String,
}

impl DumpDocument {
    pub(crate) fn new(database: impl Into<String>, table_count: usize, contents: String) -> Self {
        Self {
            database: database.into(),
            table_count,
            contents,
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn table_count(&self) -> usize {
        self.table_count
    }

    pub fn as_str(&self) -> &str {
        &self.contents
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn into_contents(self) -> String {
        self.contents
    }
}

/// Generates a dump covering every table the job selects.
///
/// The whole document is assembled in memory and handed over at once; the
/// first error while preparing any table aborts the export, so callers
/// never see a partial dump.
pub async fn generate_dump<C>(conn: &mut C, database: &str, job: &ExportJob) -> Result<DumpDocument>
where
    C: Connection + ?Sized,
{
    generate_dump_with_progress(conn, database, job, |_, _, _| {}).await
}

/// Same as [`generate_dump`], invoking `progress` after each finished table
/// with `(table, finished, total)`.
pub async fn generate_dump_with_progress<C, F>(
    conn: &mut C,
    database: &str,
    job: &ExportJob,
    mut progress: F,
) -> Result<DumpDocument>
where
    C: Connection + ?Sized,
    F: FnMut(&str, usize, usize),
{
    let catalog_tables = catalog::list_tables(conn).await?;
    let tables = job.selection().resolve(&catalog_tables)?;
    let total = tables.len();

    tracing::info!("Exporting {} table(s) from '{}'", total, database);

    let server_version = conn.server_version().await?;
    let mut contents = String::new();
    write_header(&mut contents, database, &server_version, total);

    for (idx, table) in tables.iter().enumerate() {
        append_table(&mut contents, conn, table, job).await?;
        progress(table, idx + 1, total);
    }

    write_trailer(&mut contents);

    Ok(DumpDocument::new(database, total, contents))
}

/// Identification banner, session setup, and database summary. Informational
/// lines are comments; the restore side never parses them.
fn write_header(out: &mut String, database: &str, server_version: &str, table_count: usize) {
    let generated = chrono::Local::now().format("%b %d, %Y at %I:%M %p");

    out.push_str("-- Simple Backup SQL Dump\n");
    out.push_str(concat!("-- Version ", env!("CARGO_PKG_VERSION"), "\n"));
    out.push_str("-- https://github.com/serenorg/mysql-simple-backup\n");
    out.push_str("--\n");
    out.push_str(&format!("-- Generation Time: {}\n", generated));
    out.push_str(&format!("-- Server Version: {}\n", server_version));
    out.push_str("--\n\n");
    out.push_str("SET SQL_MODE = \"NO_AUTO_VALUE_ON_ZERO\";\n");
    out.push_str("SET time_zone = \"+00:00\";\n\n");
    out.push_str("--\n");
    out.push_str(&format!("-- Database: `{}`\n", database));
    out.push_str(&format!("-- Total Tables: {}\n", table_count));
    out.push_str("--\n\n");
}

/// Re-enables what the restore prologue disabled and restores the session
/// charset, for replays that go through a bare client.
fn write_trailer(out: &mut String) {
    out.push_str("SET FOREIGN_KEY_CHECKS = 1;\n");
    out.push_str("SET NAMES 'utf8';\n");
}

/// One table block: idempotent CREATE, then INSERT statements of at most
/// `chunk_size` tuples each, then a blank separator line.
async fn append_table<C>(
    out: &mut String,
    conn: &mut C,
    table: &str,
    job: &ExportJob,
) -> Result<()>
where
    C: Connection + ?Sized,
{
    tracing::debug!("Dumping table '{}'", table);

    let create = conn.create_statement(table).await?;
    out.push_str(&idempotent_create(&create));
    out.push_str(";\n\n");

    let chunk_size = job.chunk_size();
    let mut cursor = conn.open_rows(table, job.filter_for(table)).await?;
    let mut in_chunk = 0usize;
    let mut row_count = 0u64;

    while let Some(row) = cursor.next_row().await? {
        if in_chunk == 0 {
            out.push_str("INSERT INTO ");
            out.push_str(table);
            out.push_str(" VALUES\n");
        } else {
            out.push_str(",\n");
        }
        out.push_str(&render_tuple(&row));
        in_chunk += 1;
        row_count += 1;
        if in_chunk == chunk_size {
            out.push_str(";\n");
            in_chunk = 0;
        }
    }
    if in_chunk > 0 {
        out.push_str(";\n");
    }
    drop(cursor);

    out.push('\n');
    tracing::debug!("Table '{}' exported with {} row(s)", table, row_count);
    Ok(())
}
