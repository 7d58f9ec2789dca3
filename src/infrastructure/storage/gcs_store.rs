use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use object_store::ObjectStore;
use object_store::gcp::GoogleCloudStorageBuilder;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

use super::object_backend;

/// Google Cloud Storage bucket addressed by the recognizer as `gs://bucket/path`.
pub struct GcsStagingStore {
    inner: Arc<dyn ObjectStore>,
    bucket: String,
}

impl GcsStagingStore {
    /// Without a service account key the builder falls back to the
    /// `GOOGLE_*` environment variables and application default credentials.
    pub fn new(bucket: &str, service_account_key: Option<&str>) -> Result<Self, StagingStoreError> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
        if let Some(key) = service_account_key {
            builder = builder.with_service_account_key(key);
        }
        let store = builder
            .build()
            .map_err(|e| StagingStoreError::Misconfigured(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl StagingStore for GcsStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        _content_length: Option<u64>,
    ) -> Result<u64, StagingStoreError> {
        object_backend::put_stream(self.inner.as_ref(), path, stream).await
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        object_backend::delete(self.inner.as_ref(), path).await
    }

    async fn head(&self, path: &StoragePath) -> Result<u64, StagingStoreError> {
        object_backend::head(self.inner.as_ref(), path).await
    }

    fn uri(&self, path: &StoragePath) -> String {
        format!("gs://{}/{}", self.bucket, path)
    }
}
