pub mod media;
pub mod observability;
pub mod recognition;
pub mod service_account;
pub mod storage;
