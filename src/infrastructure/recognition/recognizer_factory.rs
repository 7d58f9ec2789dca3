use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::infrastructure::service_account::decode_service_account_key;

use super::access_token::ServiceAccountTokenSource;
use super::google_speech_recognizer::{GoogleCredentials, GoogleSpeechRecognizer};
use super::mock_recognizer::MockSpeechRecognizer;
use super::openai_whisper_recognizer::OpenAiWhisperRecognizer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecognitionProvider {
    Google,
    OpenAi,
    Mock,
}

/// Everything a provider may need; each provider reads only its own fields.
#[derive(Debug, Clone, Default)]
pub struct RecognizerOptions {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    /// Base64-encoded service account JSON.
    pub service_account_key_base64: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub request_timeout: Duration,
    pub operation_poll_interval: Duration,
    pub operation_timeout: Duration,
}

pub struct RecognizerFactory;

impl RecognizerFactory {
    pub fn create(
        provider: RecognitionProvider,
        options: RecognizerOptions,
    ) -> Result<Arc<dyn SpeechRecognizer>, RecognitionError> {
        match provider {
            RecognitionProvider::Google => {
                let credentials = google_credentials(
                    options.service_account_key_base64.as_deref(),
                    options.access_token,
                    options.api_key,
                )?;
                let recognizer =
                    GoogleSpeechRecognizer::new(credentials, options.base_url, options.request_timeout)?
                        .with_operation_polling(
                            options.operation_poll_interval,
                            options.operation_timeout,
                        );
                Ok(Arc::new(recognizer))
            }
            RecognitionProvider::OpenAi => {
                let key = options.api_key.ok_or_else(|| {
                    RecognitionError::Misconfigured(
                        "API key required for OpenAI Whisper".to_string(),
                    )
                })?;
                let recognizer = OpenAiWhisperRecognizer::new(
                    key,
                    options.base_url,
                    options.model,
                    options.request_timeout,
                )?;
                Ok(Arc::new(recognizer))
            }
            RecognitionProvider::Mock => Ok(Arc::new(MockSpeechRecognizer {
                delay: Duration::ZERO,
            })),
        }
    }
}

/// Service account wins over a static token, which wins over an API key.
fn google_credentials(
    service_account_key_base64: Option<&str>,
    access_token: Option<String>,
    api_key: Option<String>,
) -> Result<GoogleCredentials, RecognitionError> {
    if let Some(encoded) = service_account_key_base64 {
        let key_json = decode_service_account_key(encoded)
            .map_err(|e| RecognitionError::Misconfigured(e.to_string()))?;
        let source = ServiceAccountTokenSource::from_json(&key_json)?;
        return Ok(GoogleCredentials::ServiceAccount(Arc::new(source)));
    }
    match (access_token, api_key) {
        (Some(token), _) => Ok(GoogleCredentials::AccessToken(token)),
        (None, Some(key)) => Ok(GoogleCredentials::ApiKey(key)),
        (None, None) => Err(RecognitionError::Misconfigured(
            "service_account_key_base64, access_token or api_key required for Google Speech"
                .to_string(),
        )),
    }
}
