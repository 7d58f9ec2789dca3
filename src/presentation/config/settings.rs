use std::path::PathBuf;
use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::application::services::SubmissionStrategy;
use crate::domain::{
    AudioEncoding, DEFAULT_CHUNK_DURATION_SECONDS, DEFAULT_LANGUAGE_CODE, PollPolicy,
    RecognitionConfig,
};
use crate::infrastructure::media::MediaProbeProvider;
use crate::infrastructure::observability::DEFAULT_FILTER;
use crate::infrastructure::recognition::{RecognitionProvider, RecognizerOptions};

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub recognition: RecognitionSettings,
    pub chunking: ChunkingSettings,
    pub submission: SubmissionSettings,
    pub media: MediaSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
    pub static_dir: Option<String>,
    pub upload_dir: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_mb: 200,
            static_dir: None,
            upload_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    pub provider: RecognitionProviderSetting,
    pub language_code: String,
    pub encoding_override: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub service_account_key_base64: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub request_timeout_secs: u64,
    pub operation_poll_interval_secs: u64,
    pub operation_timeout_secs: u64,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            provider: RecognitionProviderSetting::Google,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            encoding_override: None,
            api_key: None,
            access_token: None,
            service_account_key_base64: None,
            base_url: None,
            model: None,
            request_timeout_secs: 120,
            operation_poll_interval_secs: 10,
            operation_timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionProviderSetting {
    Google,
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub chunk_duration_seconds: f64,
    pub max_concurrent_segments: usize,
    pub scratch_dir: Option<String>,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_duration_seconds: DEFAULT_CHUNK_DURATION_SECONDS,
            max_concurrent_segments: 1,
            scratch_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubmissionSettings {
    pub strategy: SubmissionStrategySetting,
    pub inline_max_duration_seconds: f64,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            strategy: SubmissionStrategySetting::Chunked,
            inline_max_duration_seconds: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStrategySetting {
    Chunked,
    Staged,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    pub prober: MediaProberSetting,
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    pub command_timeout_secs: u64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            prober: MediaProberSetting::Ffprobe,
            ffprobe_path: "ffprobe".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            command_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaProberSetting {
    Ffprobe,
    Symphonia,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
    pub gcs_bucket: Option<String>,
    pub gcs_service_account_key_base64: Option<String>,
    pub visibility_initial_interval_ms: u64,
    pub visibility_max_interval_ms: u64,
    pub visibility_timeout_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Local,
            local_path: "./staging".to_string(),
            gcs_bucket: None,
            gcs_service_account_key_base64: None,
            visibility_initial_interval_ms: 1_000,
            visibility_max_interval_ms: 10_000,
            visibility_timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Gcs,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_FILTER.to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Layers `appsettings.{environment}` (optional) under `APP_`-prefixed
    /// environment variables, e.g. `APP_RECOGNITION__LANGUAGE_CODE=en-US`.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!(
                    "appsettings.{}",
                    environment.as_str()
                ))
                .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let chunk = self.chunking.chunk_duration_seconds;
        if !chunk.is_finite() || chunk <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "chunking.chunk_duration_seconds must be positive, got {}",
                chunk
            )));
        }
        if self.chunking.max_concurrent_segments == 0 {
            return Err(SettingsError::Invalid(
                "chunking.max_concurrent_segments must be at least 1".to_string(),
            ));
        }
        if self.submission.inline_max_duration_seconds <= 0.0 {
            return Err(SettingsError::Invalid(
                "submission.inline_max_duration_seconds must be positive".to_string(),
            ));
        }
        if self.recognition.language_code.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "recognition.language_code must not be empty".to_string(),
            ));
        }
        self.encoding_override()?;
        Ok(())
    }

    pub fn encoding_override(&self) -> Result<Option<AudioEncoding>, SettingsError> {
        self.recognition
            .encoding_override
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<AudioEncoding>().map_err(SettingsError::Invalid))
            .transpose()
    }

    pub fn recognition_config(&self) -> Result<RecognitionConfig, SettingsError> {
        Ok(RecognitionConfig {
            chunk_duration_seconds: self.chunking.chunk_duration_seconds,
            language_code: self.recognition.language_code.clone(),
            encoding_override: self.encoding_override()?,
        })
    }

    pub fn recognition_provider(&self) -> RecognitionProvider {
        match self.recognition.provider {
            RecognitionProviderSetting::Google => RecognitionProvider::Google,
            RecognitionProviderSetting::OpenAi => RecognitionProvider::OpenAi,
            RecognitionProviderSetting::Mock => RecognitionProvider::Mock,
        }
    }

    pub fn recognizer_options(&self) -> RecognizerOptions {
        let r = &self.recognition;
        RecognizerOptions {
            api_key: r.api_key.clone(),
            access_token: r.access_token.clone(),
            service_account_key_base64: r.service_account_key_base64.clone(),
            base_url: r.base_url.clone(),
            model: r.model.clone(),
            request_timeout: Duration::from_secs(r.request_timeout_secs),
            operation_poll_interval: Duration::from_secs(r.operation_poll_interval_secs),
            operation_timeout: Duration::from_secs(r.operation_timeout_secs),
        }
    }

    pub fn submission_strategy(&self) -> SubmissionStrategy {
        match self.submission.strategy {
            SubmissionStrategySetting::Chunked => SubmissionStrategy::Chunked,
            SubmissionStrategySetting::Staged => SubmissionStrategy::Staged,
        }
    }

    pub fn media_probe_provider(&self) -> MediaProbeProvider {
        match self.media.prober {
            MediaProberSetting::Ffprobe => MediaProbeProvider::Ffprobe,
            MediaProberSetting::Symphonia => MediaProbeProvider::Symphonia,
        }
    }

    pub fn media_command_timeout(&self) -> Duration {
        Duration::from_secs(self.media.command_timeout_secs)
    }

    pub fn visibility_policy(&self) -> PollPolicy {
        PollPolicy {
            initial_interval: Duration::from_millis(self.storage.visibility_initial_interval_ms),
            max_interval: Duration::from_millis(self.storage.visibility_max_interval_ms),
            timeout: Duration::from_secs(self.storage.visibility_timeout_secs),
        }
    }

    pub fn upload_dir(&self) -> Option<PathBuf> {
        self.server.upload_dir.as_ref().map(PathBuf::from)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid setting: {0}")]
    Invalid(String),
}
