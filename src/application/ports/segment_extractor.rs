use std::path::Path;

use async_trait::async_trait;

/// Copies one time range of a source recording into its own file.
#[async_trait]
pub trait SegmentExtractor: Send + Sync {
    async fn extract(
        &self,
        source: &Path,
        start_offset_seconds: f64,
        duration_seconds: f64,
        output: &Path,
    ) -> Result<(), SegmentExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SegmentExtractionError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("extractor produced no output")]
    EmptyOutput,
    #[error("scratch storage: {0}")]
    Scratch(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
