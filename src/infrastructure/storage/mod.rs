mod gcs_store;
mod local_store;
mod mock_store;
mod object_backend;
mod store_factory;

pub use gcs_store::GcsStagingStore;
pub use local_store::LocalStagingStore;
pub use mock_store::MockStagingStore;
pub use store_factory::StagingStoreFactory;
