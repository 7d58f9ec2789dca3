use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{AudioPayload, RecognitionError, SpeechRecognizer};
use crate::domain::{AudioEncoding, RecognitionParams};

/// OpenAI-compatible `/audio/transcriptions` endpoint. Inline payloads only.
pub struct OpenAiWhisperRecognizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperRecognizer {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, RecognitionError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| RecognitionError::Misconfigured(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        })
    }
}

/// File name and mime type the endpoint uses to sniff the container.
pub fn upload_descriptor(encoding: AudioEncoding) -> (&'static str, &'static str) {
    match encoding {
        AudioEncoding::Linear16 => ("audio.wav", "audio/wav"),
        AudioEncoding::Flac => ("audio.flac", "audio/flac"),
        AudioEncoding::Mp3 => ("audio.mp3", "audio/mpeg"),
        AudioEncoding::Aac => ("audio.m4a", "audio/mp4"),
        AudioEncoding::OggOpus => ("audio.ogg", "audio/ogg"),
        AudioEncoding::Alac => ("audio.m4a", "audio/mp4"),
    }
}

/// Whisper takes two-letter ISO-639-1 codes, not BCP-47 tags.
pub fn whisper_language(language_code: &str) -> &str {
    language_code.split('-').next().unwrap_or(language_code)
}

#[async_trait]
impl SpeechRecognizer for OpenAiWhisperRecognizer {
    async fn recognize(
        &self,
        payload: &AudioPayload,
        params: &RecognitionParams,
    ) -> Result<String, RecognitionError> {
        let audio_data = match payload {
            AudioPayload::Inline(bytes) => bytes,
            AudioPayload::Staged { uri } => {
                return Err(RecognitionError::UnsupportedPayload(format!(
                    "whisper cannot read staged audio at {}",
                    uri
                )));
            }
        };

        let url = format!("{}/audio/transcriptions", self.base_url);
        let (file_name, mime) = upload_descriptor(params.encoding);

        let file_part = multipart::Part::bytes(audio_data.clone())
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .text(
                "language",
                whisper_language(&params.language_code).to_string(),
            )
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("request: {}", e)))?;

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

        let transcript = response
            .text()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("body: {}", e)))?;

        let transcript = transcript.trim().to_string();
        if transcript.is_empty() {
            return Err(RecognitionError::NoResults);
        }

        tracing::info!(
            chars = transcript.len(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }
}
