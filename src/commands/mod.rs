// ABOUTME: Command implementations behind the CLI surface
// ABOUTME: Exports the export, restore, and tables commands plus shared deadline handling

pub mod export;
pub mod restore;
pub mod tables;

pub use export::{export, ExportOptions};
pub use restore::{restore, RestoreOptions};
pub use tables::tables;

use crate::error::{BackupError, Result};
use std::future::Future;
use std::time::Duration;

/// Runs `fut` under an optional deadline, mapping expiry to
/// [`BackupError::Timeout`].
///
/// [`BackupError::Timeout`]: crate::error::BackupError::Timeout
pub(crate) async fn with_timeout<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match limit {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(BackupError::Timeout(limit)),
        },
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_limit_runs_to_completion() {
        let result = with_timeout(None, async { Ok(42) }).await.unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn expired_limit_becomes_a_timeout_error() {
        let err = with_timeout(Some(Duration::from_millis(5)), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, BackupError::Timeout(_)));
    }

    #[tokio::test]
    async fn generous_limit_passes_the_result_through() {
        let result = with_timeout(Some(Duration::from_secs(60)), async { Ok("done") })
            .await
            .unwrap();
        assert_eq!(result, "done");
    }
}
