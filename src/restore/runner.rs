// ABOUTME: Sequential replay of dump documents against a live session
// ABOUTME: Drops created tables first, records statement failures, aborts on lost sessions

use crate::connection::Connection;
use crate::error::{BackupError, Result};
use crate::job::RestoreJob;
use crate::restore::parser::{created_table_names, split_statements};

/// One statement the server rejected during replay.
#[derive(Debug, Clone)]
pub struct StatementFailure {
    pub statement: String,
    pub message: String,
}

/// What a restore run did: how many statements it pushed at the server, how
/// many stale tables it dropped, and which statements the server rejected.
#[derive(Debug, Default)]
pub struct RestoreOutcome {
    statements_run: usize,
    tables_dropped: usize,
    failures: Vec<StatementFailure>,
}

impl RestoreOutcome {
    /// Total statements sent, counting prologue, drops, and replay.
    pub fn statements_run(&self) -> usize {
        self.statements_run
    }

    /// Tables removed before replay began.
    pub fn tables_dropped(&self) -> usize {
        self.tables_dropped
    }

    /// Statements the server rejected, in execution order.
    pub fn failures(&self) -> &[StatementFailure] {
        &self.failures
    }

    /// True when every statement was accepted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line success text, or one line per rejected statement.
    pub fn message(&self) -> String {
        if self.is_success() {
            "Importing finished successfully".to_string()
        } else {
            self.failures
                .iter()
                .map(|failure| {
                    format!(
                        "Error performing query: {}: {}",
                        failure.statement, failure.message
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Replays `job`'s document over `conn`.
///
/// Runs in four phases: disable foreign key checks, drop every table the
/// document creates, force the utf8 character set, then execute the
/// document's statements in order. A rejected statement is recorded and
/// replay continues; a lost session aborts the run with
/// [`BackupError::Connection`].
///
/// [`BackupError::Connection`]: crate::error::BackupError::Connection
pub async fn run_restore<C: Connection + ?Sized>(
    conn: &mut C,
    job: &RestoreJob,
) -> Result<RestoreOutcome> {
    let document = job.document()?;
    let mut outcome = RestoreOutcome::default();

    run_step(conn, "SET foreign_key_checks = 0", &mut outcome).await?;

    let tables = created_table_names(&document);
    tracing::debug!("Dropping {} existing table(s) before replay", tables.len());
    for table in &tables {
        let drop = format!("DROP TABLE IF EXISTS `{}`", table);
        if run_step(conn, &drop, &mut outcome).await? {
            outcome.tables_dropped += 1;
        }
    }

    run_step(conn, "SET NAMES 'utf8'", &mut outcome).await?;

    let statements = split_statements(&document);
    tracing::info!("Replaying {} statement(s)", statements.len());
    for statement in &statements {
        run_step(conn, statement, &mut outcome).await?;
    }

    if outcome.is_success() {
        tracing::info!(
            "Restore complete: {} statement(s) executed, {} table(s) dropped",
            outcome.statements_run,
            outcome.tables_dropped
        );
    } else {
        tracing::warn!(
            "Restore finished with {} failed statement(s) out of {}",
            outcome.failures.len(),
            outcome.statements_run
        );
    }

    Ok(outcome)
}

/// Sends one statement. Returns `Ok(true)` when the server accepted it,
/// `Ok(false)` when the server rejected it (failure recorded), and `Err` only
/// when the session itself is unusable.
async fn run_step<C: Connection + ?Sized>(
    conn: &mut C,
    statement: &str,
    outcome: &mut RestoreOutcome,
) -> Result<bool> {
    outcome.statements_run += 1;
    match conn.execute(statement).await {
        Ok(()) => Ok(true),
        Err(BackupError::Statement { statement, message }) => {
            tracing::warn!("Statement rejected, continuing: {}", message);
            outcome.failures.push(StatementFailure { statement, message });
            Ok(false)
        }
        Err(other) => Err(other),
    }
}
