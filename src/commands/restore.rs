// ABOUTME: Restore command: replays a dump file into the connected database
// ABOUTME: Prints the outcome and exits non-zero when any statement failed

use crate::job::RestoreJob;
use crate::mysql::MysqlConnection;
use crate::restore::run_restore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub struct RestoreOptions {
    pub url: String,
    pub file: PathBuf,
    pub timeout_secs: Option<u64>,
}

/// Restore a dump file into the connected database.
///
/// Replays every statement in order, tolerating individual rejections; the
/// command fails only when the session dies, the deadline expires, or at
/// least one statement was rejected.
pub async fn restore(opts: RestoreOptions) -> Result<()> {
    tracing::info!("Starting restore from {}", opts.file.display());

    let mut job = RestoreJob::from_file(&opts.file);
    if let Some(secs) = opts.timeout_secs {
        job = job.with_timeout(Duration::from_secs(secs));
    }

    let mut conn = MysqlConnection::connect(&opts.url)
        .await
        .context("Failed to connect to MySQL")?;
    let database = conn.database().to_string();
    tracing::info!("✓ Connected to database '{}'", database);

    let outcome = super::with_timeout(job.timeout(), run_restore(&mut conn, &job))
        .await
        .context("Restore failed")?;

    if let Err(e) = conn.disconnect().await {
        tracing::debug!("Error closing connection: {}", e);
    }

    println!("{}", outcome.message());

    tracing::info!(
        "Executed {} statement(s), dropped {} table(s)",
        outcome.statements_run(),
        outcome.tables_dropped()
    );

    if !outcome.is_success() {
        anyhow::bail!(
            "Restore completed with {} failed statement(s)",
            outcome.failures().len()
        );
    }

    tracing::info!("✓ Restore into '{}' complete", database);

    Ok(())
}
