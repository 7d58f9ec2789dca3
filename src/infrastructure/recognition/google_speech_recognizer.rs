use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioPayload, RecognitionError, SpeechRecognizer};
use crate::domain::RecognitionParams;

use super::access_token::AccessTokenSource;

pub const DEFAULT_BASE_URL: &str = "https://speech.googleapis.com";
pub const DEFAULT_OPERATION_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub enum GoogleCredentials {
    ApiKey(String),
    AccessToken(String),
    /// Fresh bearer token per request, from a refreshing source.
    ServiceAccount(Arc<dyn AccessTokenSource>),
}

/// Google Cloud Speech-to-Text v1 over REST.
///
/// Inline payloads use `speech:recognize`; staged payloads use
/// `speech:longrunningrecognize` and poll `operations/{name}` at a fixed
/// interval until done or the operation deadline passes.
pub struct GoogleSpeechRecognizer {
    client: Client,
    base_url: String,
    credentials: GoogleCredentials,
    poll_interval: Duration,
    operation_timeout: Duration,
}

impl GoogleSpeechRecognizer {
    pub fn new(
        credentials: GoogleCredentials,
        base_url: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, RecognitionError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| RecognitionError::Misconfigured(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            credentials,
            poll_interval: DEFAULT_OPERATION_POLL_INTERVAL,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        })
    }

    pub fn with_operation_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.operation_timeout = timeout;
        self
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, RecognitionError> {
        Ok(match &self.credentials {
            GoogleCredentials::ApiKey(key) => request.header("x-goog-api-key", key),
            GoogleCredentials::AccessToken(token) => request.bearer_auth(token),
            GoogleCredentials::ServiceAccount(source) => {
                request.bearer_auth(source.access_token().await?)
            }
        })
    }

    async fn recognize_inline(
        &self,
        audio: &[u8],
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError> {
        let url = format!("{}/v1/speech:recognize", self.base_url);
        let body = RecognizeRequest {
            config: RecognitionConfigBody::from(params),
            audio: RecognitionAudio {
                content: Some(general_purpose::STANDARD.encode(audio)),
                uri: None,
            },
        };

        tracing::debug!(bytes = audio.len(), encoding = %params.encoding, "Sending inline audio to Google Speech");

        let response = self
            .authorize(self.client.post(&url))
            .await?
            .json(&body)
            .send()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("request: {}", e)))?;

        let result: RecognizeResponse = parse_json(response).await?;
        result.into_transcript()
    }

    async fn recognize_staged(
        &self,
        uri: &str,
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError> {
        let operation = self.submit_long_running(uri, params).await?;
        tracing::info!(operation = %operation, uri = %uri, "Long-running recognition submitted");
        self.poll_until_done(&operation).await
    }

    async fn submit_long_running(
        &self,
        uri: &str,
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError> {
        let url = format!("{}/v1/speech:longrunningrecognize", self.base_url);
        let body = RecognizeRequest {
            config: RecognitionConfigBody::from(params),
            audio: RecognitionAudio {
                content: None,
                uri: Some(uri.to_string()),
            },
        };

        let response = self
            .authorize(self.client.post(&url))
            .await?
            .json(&body)
            .send()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("submit: {}", e)))?;

        let operation: Operation = parse_json(response).await?;
        Ok(operation.name)
    }

    async fn poll_until_done(&self, operation: &str) -> Result<String, RecognitionError> {
        let url = format!("{}/v1/operations/{}", self.base_url, operation);

        let poll_future = async {
            loop {
                let response = self
                    .authorize(self.client.get(&url))
                    .await?
                    .send()
                    .await
                    .map_err(|e| RecognitionError::ApiRequestFailed(format!("poll: {}", e)))?;

                let status: Operation = parse_json(response).await?;

                if let Some(error) = status.error {
                    return Err(RecognitionError::OperationFailed(format!(
                        "code {}: {}",
                        error.code, error.message
                    )));
                }

                if status.done {
                    return status
                        .response
                        .ok_or(RecognitionError::NoResults)?
                        .into_transcript();
                }

                tracing::debug!(operation = %operation, "Recognition operation still running");
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(self.operation_timeout, poll_future)
            .await
            .map_err(|_| RecognitionError::OperationTimedOut(self.operation_timeout.as_secs()))?
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechRecognizer {
    #[tracing::instrument(skip(self, payload, params), fields(payload = payload.kind()))]
    async fn recognize(
        &self,
        payload: &AudioPayload,
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError> {
        match payload {
            AudioPayload::Inline(audio) => self.recognize_inline(audio, params).await,
            AudioPayload::Staged { uri } => self.recognize_staged(uri, params).await,
        }
    }
}

async fn parse_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, RecognitionError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(RecognitionError::ApiRequestFailed(format!(
            "status {}: {}",
            status, body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RecognitionError::ApiRequestFailed(format!("parse response: {}", e)))
}

#[derive(Debug, Serialize)]
pub struct RecognizeRequest {
    pub config: RecognitionConfigBody,
    pub audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfigBody {
    pub encoding: String,
    pub sample_rate_hertz: u32,
    pub audio_channel_count: u16,
    pub language_code: String,
}

impl From<&RecognitionParams> for RecognitionConfigBody {
    fn from(params: &RecognitionParams) -> Self {
        Self {
            encoding: params.encoding.as_str().to_string(),
            sample_rate_hertz: params.sample_rate_hertz,
            audio_channel_count: params.audio_channel_count,
            language_code: params.language_code.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecognitionAudio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
}

impl RecognizeResponse {
    /// Joins the top alternative of each result with newlines.
    pub fn into_transcript(self) -> Result<String, RecognitionError> {
        let lines: Vec<String> = self
            .results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .collect();

        if lines.is_empty() {
            return Err(RecognitionError::NoResults);
        }
        Ok(lines.join("\n"))
    }
}

#[derive(Debug, Deserialize)]
pub struct SpeechRecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechRecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub error: Option<OperationError>,
    pub response: Option<RecognizeResponse>,
}

#[derive(Debug, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}
