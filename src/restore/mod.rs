// ABOUTME: Restore engine: statement parsing and sequential replay
// ABOUTME: Exports the runner entry point and its outcome types

pub mod parser;
pub mod runner;

pub use runner::{run_restore, RestoreOutcome, StatementFailure};
