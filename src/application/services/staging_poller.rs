use tokio_util::sync::CancellationToken;

use crate::application::ports::StagingStore;
use crate::domain::{PollPolicy, StoragePath};

/// Polls `head` until the staged object is visible, returning its size.
///
/// Retries with exponential backoff capped at `policy.max_interval` and gives
/// up once `policy.timeout` has elapsed.
pub async fn wait_until_visible(
    store: &dyn StagingStore,
    path: &StoragePath,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<u64, StagingWaitError> {
    let poll_future = async {
        let mut backoff = policy.initial_interval;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match store.head(path).await {
                Ok(size) => {
                    tracing::debug!(path = %path, attempts, bytes = size, "Staged object visible");
                    return Ok(size);
                }
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        path = %path,
                        attempts,
                        retry_in_ms = backoff.as_millis() as u64,
                        "Staged object not visible yet"
                    );
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(StagingWaitError::Cancelled),
                _ = tokio::time::sleep(backoff) => {}
            }
            backoff = policy.next_interval(backoff);
        }
    };

    tokio::time::timeout(policy.timeout, poll_future)
        .await
        .map_err(|_| StagingWaitError::Timeout {
            path: path.to_string(),
            waited_secs: policy.timeout.as_secs(),
        })?
}

#[derive(Debug, thiserror::Error)]
pub enum StagingWaitError {
    #[error("staged object {path} not visible after {waited_secs}s")]
    Timeout { path: String, waited_secs: u64 },
    #[error("cancelled while waiting for staged object")]
    Cancelled,
}
