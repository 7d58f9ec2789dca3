use std::path::Path;

use async_trait::async_trait;

use crate::domain::AudioProperties;

#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<AudioProperties, MediaProbeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaProbeError {
    #[error("source file is empty")]
    EmptyFile,
    #[error("source file is unreadable: {0}")]
    Unreadable(String),
    #[error("no audio stream found")]
    NoAudioStream,
    #[error("probe failed: {0}")]
    ProbeFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
