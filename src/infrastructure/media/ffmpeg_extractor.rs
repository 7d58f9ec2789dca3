use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{SegmentExtractionError, SegmentExtractor};

use super::process::run_tool;

/// Cuts segments with ffmpeg, stream-copying the first audio stream so the
/// output keeps the source codec, sample rate and channel layout.
pub struct FfmpegSegmentExtractor {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegSegmentExtractor {
    pub fn new(ffmpeg_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }

    pub fn build_args(
        source: &Path,
        start_offset_seconds: f64,
        duration_seconds: f64,
        output: &Path,
    ) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-y".to_string(),
            "-ss".to_string(),
            format!("{:.3}", start_offset_seconds),
            "-t".to_string(),
            format!("{:.3}", duration_seconds),
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
            "-map".to_string(),
            "0:a:0".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

#[async_trait]
impl SegmentExtractor for FfmpegSegmentExtractor {
    async fn extract(
        &self,
        source: &Path,
        start_offset_seconds: f64,
        duration_seconds: f64,
        output: &Path,
    ) -> Result<(), SegmentExtractionError> {
        let args = Self::build_args(source, start_offset_seconds, duration_seconds, output);
        run_tool(&self.ffmpeg_path, &args, self.timeout)
            .await
            .map_err(SegmentExtractionError::ExtractionFailed)?;
        Ok(())
    }
}
