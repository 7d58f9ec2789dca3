use std::sync::atomic::Ordering;
use std::time::Duration;

use bytes::Bytes;
use futures::stream;
use tokio_util::sync::CancellationToken;

use chunkscribe::application::ports::StagingStore;
use chunkscribe::application::services::{StagingWaitError, wait_until_visible};
use chunkscribe::domain::{PollPolicy, StoragePath, UploadId};

use crate::helpers::InMemoryStagingStore;

fn fast_policy(timeout_ms: u64) -> PollPolicy {
    PollPolicy {
        initial_interval: Duration::from_millis(5),
        max_interval: Duration::from_millis(20),
        timeout: Duration::from_millis(timeout_ms),
    }
}

async fn staged(store: &InMemoryStagingStore) -> StoragePath {
    let path = StoragePath::new(&UploadId::new(), "source.flac");
    let body = Box::pin(stream::iter(vec![Ok(Bytes::from_static(b"0123456789"))]));
    store.store(&path, body, None).await.unwrap();
    path
}

#[tokio::test]
async fn given_eventually_visible_object_when_polling_then_returns_size_after_retries() {
    let store = InMemoryStagingStore::visible_after(3);
    let path = staged(&store).await;

    let size = wait_until_visible(&store, &path, fast_policy(2_000), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(size, 10);
    assert_eq!(store.head_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn given_never_visible_object_when_polling_then_times_out() {
    let store = InMemoryStagingStore::never_visible();
    let path = staged(&store).await;

    let result =
        wait_until_visible(&store, &path, fast_policy(60), &CancellationToken::new()).await;

    assert!(matches!(result, Err(StagingWaitError::Timeout { .. })));
}

#[tokio::test]
async fn given_cancelled_token_when_polling_then_stops_waiting() {
    let store = InMemoryStagingStore::never_visible();
    let path = staged(&store).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = wait_until_visible(&store, &path, fast_policy(5_000), &cancel).await;

    assert!(matches!(result, Err(StagingWaitError::Cancelled)));
}

#[test]
fn given_policy_when_backing_off_then_doubles_up_to_cap() {
    let policy = PollPolicy {
        initial_interval: Duration::from_secs(1),
        max_interval: Duration::from_secs(5),
        timeout: Duration::from_secs(300),
    };

    assert_eq!(policy.next_interval(Duration::from_secs(1)), Duration::from_secs(2));
    assert_eq!(policy.next_interval(Duration::from_secs(4)), Duration::from_secs(5));
}

#[test]
fn given_fixed_policy_when_backing_off_then_interval_never_changes() {
    let policy = PollPolicy::fixed(Duration::from_secs(10), Duration::from_secs(300));

    assert_eq!(
        policy.next_interval(Duration::from_secs(10)),
        Duration::from_secs(10)
    );
}
