// ABOUTME: Error types shared by the dump and restore engines
// ABOUTME: Separates recoverable statement failures from fatal connection loss

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackupError>;

/// Engine-level failures. `Statement` is the only kind the restore runner
/// recovers from locally; everything else ends the job.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The database cannot be reached, authenticated against, or has dropped
    /// the session mid-job.
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// The table selection resolved to an empty set; raised before any dump
    /// or restore work starts.
    #[error("No tables found to export. Check your table selection.")]
    NoTablesSelected,

    /// The server rejected a single statement.
    #[error("Error performing query: {statement}: {message}")]
    Statement { statement: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Job validation failure, detected before touching the database.
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

impl BackupError {
    pub fn connection(message: impl Into<String>) -> Self {
        BackupError::Connection {
            message: message.into(),
        }
    }

    pub fn statement(statement: impl Into<String>, message: impl Into<String>) -> Self {
        BackupError::Statement {
            statement: statement.into(),
            message: message.into(),
        }
    }

    pub fn invalid_job(message: impl Into<String>) -> Self {
        BackupError::InvalidJob(message.into())
    }
}
