use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

use super::object_backend;

/// Staging on local disk; useful with recognizers that can read `file://` URIs
/// and for development.
pub struct LocalStagingStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalStagingStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&base_path).map_err(StagingStoreError::Io)?;
        let base_path = base_path.canonicalize().map_err(StagingStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| StagingStoreError::Misconfigured(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
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
        format!("file://{}", self.base_path.join(path.as_str()).display())
    }
}
