use async_trait::async_trait;

use crate::domain::RecognitionParams;

/// Audio handed to a recognizer, either as bytes or by staged location.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioPayload {
    Inline(Vec<u8>),
    Staged { uri: String },
}

impl AudioPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::Staged { .. } => "staged",
        }
    }
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Inline payloads are recognized synchronously; staged payloads go through
    /// the service's long-running operation and are polled to completion.
    async fn recognize(
        &self,
        payload: &AudioPayload,
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("recognizer returned no results")]
    NoResults,
    #[error("recognition operation failed: {0}")]
    OperationFailed(String),
    #[error("recognition operation timed out after {0}s")]
    OperationTimedOut(u64),
    #[error("unsupported payload: {0}")]
    UnsupportedPayload(String),
    #[error("recognizer misconfigured: {0}")]
    Misconfigured(String),
}
