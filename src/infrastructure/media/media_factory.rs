use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{MediaProber, SegmentExtractor};

use super::ffmpeg_extractor::FfmpegSegmentExtractor;
use super::ffprobe_prober::FfprobeMediaProber;
use super::symphonia_prober::SymphoniaMediaProber;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaProbeProvider {
    Ffprobe,
    Symphonia,
}

pub struct MediaToolsFactory;

impl MediaToolsFactory {
    pub fn create_prober(
        provider: MediaProbeProvider,
        ffprobe_path: &str,
        timeout: Duration,
    ) -> Arc<dyn MediaProber> {
        match provider {
            MediaProbeProvider::Ffprobe => Arc::new(FfprobeMediaProber::new(ffprobe_path, timeout)),
            MediaProbeProvider::Symphonia => Arc::new(SymphoniaMediaProber),
        }
    }

    pub fn create_extractor(ffmpeg_path: &str, timeout: Duration) -> Arc<dyn SegmentExtractor> {
        Arc::new(FfmpegSegmentExtractor::new(ffmpeg_path, timeout))
    }
}
