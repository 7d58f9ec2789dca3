use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Runs `fut` unless `cancel` fires first, in which case `fut` is dropped.
pub(crate) async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        output = fut => Some(output),
    }
}
