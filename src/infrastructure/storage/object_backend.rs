use std::io;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::StagingStoreError;
use crate::domain::StoragePath;

/// Streams `stream` into a multipart upload, aborting it on the first error.
pub(crate) async fn put_stream(
    store: &dyn ObjectStore,
    path: &StoragePath,
    mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
) -> Result<u64, StagingStoreError> {
    let store_path = StorePath::from(path.as_str());
    let mut upload = store
        .put_multipart(&store_path)
        .await
        .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

    let mut total_bytes: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(b) => b,
            Err(e) => {
                let _ = upload.abort().await;
                return Err(StagingStoreError::Io(e));
            }
        };
        total_bytes += bytes.len() as u64;
        if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
            let _ = upload.abort().await;
            return Err(StagingStoreError::UploadFailed(e.to_string()));
        }
    }

    upload
        .complete()
        .await
        .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

    Ok(total_bytes)
}

pub(crate) async fn delete(
    store: &dyn ObjectStore,
    path: &StoragePath,
) -> Result<(), StagingStoreError> {
    let store_path = StorePath::from(path.as_str());
    store
        .delete(&store_path)
        .await
        .map_err(|e| StagingStoreError::DeleteFailed(e.to_string()))
}

pub(crate) async fn head(
    store: &dyn ObjectStore,
    path: &StoragePath,
) -> Result<u64, StagingStoreError> {
    let store_path = StorePath::from(path.as_str());
    let meta = store
        .head(&store_path)
        .await
        .map_err(|e| StagingStoreError::NotFound(e.to_string()))?;
    Ok(meta.size as u64)
}
