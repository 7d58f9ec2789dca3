use std::time::Duration;

use crate::application::ports::{AudioPayload, RecognitionError, SpeechRecognizer};
use crate::domain::RecognitionParams;

/// Canned recognizer for running the service without credentials.
pub struct MockSpeechRecognizer {
    pub delay: Duration,
}

#[async_trait::async_trait]
impl SpeechRecognizer for MockSpeechRecognizer {
    async fn recognize(
        &self,
        payload: &AudioPayload,
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let size = match payload {
            AudioPayload::Inline(bytes) => bytes.len().to_string(),
            AudioPayload::Staged { uri } => uri.clone(),
        };
        Ok(format!(
            "[mock {} transcript: {} {} Hz, {}]",
            params.language_code, params.encoding, params.sample_rate_hertz, size
        ))
    }
}
