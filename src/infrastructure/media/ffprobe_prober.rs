use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{MediaProbeError, MediaProber};
use crate::domain::AudioProperties;

use super::process::run_tool;

pub struct FfprobeMediaProber {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeMediaProber {
    pub fn new(ffprobe_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    #[serde(default)]
    pub streams: Vec<FfprobeStream>,
    pub format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub sample_rate: Option<String>,
    pub channels: Option<u16>,
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
}

impl FfprobeOutput {
    /// Picks the first audio stream; container duration wins over stream duration.
    pub fn into_properties(self) -> Result<AudioProperties, MediaProbeError> {
        let format_duration = self
            .format
            .and_then(|f| f.duration)
            .and_then(|d| d.parse::<f64>().ok());

        let stream = self
            .streams
            .into_iter()
            .find(|s| s.codec_type.as_deref() == Some("audio"))
            .ok_or(MediaProbeError::NoAudioStream)?;

        let sample_rate_hertz = stream
            .sample_rate
            .as_deref()
            .and_then(|r| r.parse::<u32>().ok())
            .ok_or_else(|| MediaProbeError::ProbeFailed("missing sample rate".to_string()))?;

        let duration_seconds = format_duration
            .or_else(|| stream.duration.as_deref().and_then(|d| d.parse().ok()))
            .unwrap_or(0.0);

        Ok(AudioProperties {
            codec: stream.codec_name.unwrap_or_else(|| "unknown".to_string()),
            sample_rate_hertz,
            channel_count: stream.channels.unwrap_or(1),
            duration_seconds,
        })
    }
}

#[async_trait]
impl MediaProber for FfprobeMediaProber {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn probe(&self, path: &Path) -> Result<AudioProperties, MediaProbeError> {
        let args = vec![
            "-v".to_string(),
            "error".to_string(),
            "-print_format".to_string(),
            "json".to_string(),
            "-show_format".to_string(),
            "-show_streams".to_string(),
            path.to_string_lossy().into_owned(),
        ];

        let output = run_tool(&self.ffprobe_path, &args, self.timeout)
            .await
            .map_err(MediaProbeError::ProbeFailed)?;

        let parsed: FfprobeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| MediaProbeError::ProbeFailed(format!("parse ffprobe output: {}", e)))?;

        parsed.into_properties()
    }
}
