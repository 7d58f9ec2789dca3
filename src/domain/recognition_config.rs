use super::{AudioEncoding, AudioProperties};

pub const DEFAULT_CHUNK_DURATION_SECONDS: f64 = 59.0;
pub const DEFAULT_LANGUAGE_CODE: &str = "kn-IN";

/// Per-request recognition settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionConfig {
    pub chunk_duration_seconds: f64,
    pub language_code: String,
    pub encoding_override: Option<AudioEncoding>,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            chunk_duration_seconds: DEFAULT_CHUNK_DURATION_SECONDS,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            encoding_override: None,
        }
    }
}

impl RecognitionConfig {
    /// Builds the format block sent alongside every payload of one request.
    pub fn params_for(&self, properties: &AudioProperties) -> RecognitionParams {
        RecognitionParams {
            encoding: self
                .encoding_override
                .unwrap_or_else(|| AudioEncoding::from_codec(&properties.codec)),
            sample_rate_hertz: properties.sample_rate_hertz,
            audio_channel_count: properties.channel_count,
            language_code: self.language_code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionParams {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub audio_channel_count: u16,
    pub language_code: String,
}
