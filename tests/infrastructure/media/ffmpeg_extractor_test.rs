use std::path::Path;
use std::time::Duration;

use chunkscribe::application::ports::{SegmentExtractionError, SegmentExtractor};
use chunkscribe::infrastructure::media::{FfmpegSegmentExtractor, check_binary};

use crate::helpers::build_wav;

#[test]
fn given_window_when_building_args_then_seeks_and_stream_copies_audio() {
    let args = FfmpegSegmentExtractor::build_args(
        Path::new("/in/talk.mp3"),
        59.0,
        7.25,
        Path::new("/tmp/out1.mp3"),
    );

    assert_eq!(
        args,
        vec![
            "-v", "error", "-y", "-ss", "59.000", "-t", "7.250", "-i", "/in/talk.mp3", "-map",
            "0:a:0", "-c:a", "copy", "/tmp/out1.mp3",
        ]
    );
}

#[tokio::test]
async fn given_wav_when_extracting_window_then_writes_segment_file() {
    if check_binary("ffmpeg").is_err() {
        return;
    }
    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("in.wav");
    std::fs::write(&source, build_wav(16_000, &vec![0i16; 48_000])).unwrap();
    let output = dir.path().join("out1.wav");
    let extractor = FfmpegSegmentExtractor::new("ffmpeg", Duration::from_secs(30));

    extractor.extract(&source, 1.0, 1.0, &output).await.unwrap();

    let size = std::fs::metadata(&output).unwrap().len();
    assert!(size > 44);
}

#[tokio::test]
async fn given_missing_binary_when_extracting_then_returns_extraction_failed() {
    let dir = tempfile::TempDir::new().unwrap();
    let extractor = FfmpegSegmentExtractor::new("/nonexistent/ffmpeg", Duration::from_secs(5));

    let result = extractor
        .extract(
            &dir.path().join("in.wav"),
            0.0,
            59.0,
            &dir.path().join("out0.wav"),
        )
        .await;

    assert!(matches!(
        result,
        Err(SegmentExtractionError::ExtractionFailed(_))
    ));
}
