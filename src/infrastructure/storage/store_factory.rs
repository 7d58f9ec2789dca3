use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::infrastructure::service_account::decode_service_account_key;
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::gcs_store::GcsStagingStore;
use super::local_store::LocalStagingStore;
use super::mock_store::MockStagingStore;

pub struct StagingStoreFactory;

impl StagingStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn StagingStore>, StagingStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let store = LocalStagingStore::new(path)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Gcs => {
                let bucket = settings.gcs_bucket.as_deref().ok_or_else(|| {
                    StagingStoreError::Misconfigured("gcs_bucket required".into())
                })?;
                let key = settings
                    .gcs_service_account_key_base64
                    .as_deref()
                    .map(decode_service_account_key)
                    .transpose()
                    .map_err(|e| StagingStoreError::Misconfigured(e.to_string()))?;
                let store = GcsStagingStore::new(bucket, key.as_deref())?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Mock => Ok(Arc::new(MockStagingStore)),
        }
    }
}
