use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures::StreamExt;

use chunkscribe::application::ports::SegmentExtractionError;
use chunkscribe::application::services::{ScratchSpace, Segmenter};
use chunkscribe::domain::{AudioSource, SegmentPlan, SegmentWindow};

use crate::helpers::{WritingExtractor, write_source};

fn scratch_is_empty(dir: &std::path::Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[tokio::test]
async fn given_125_second_source_when_splitting_then_yields_three_segments_in_order() {
    let work = tempfile::TempDir::new().unwrap();
    let scratch = tempfile::TempDir::new().unwrap();
    let source_path = write_source(work.path(), "talk.mp3", b"audio");
    let source = AudioSource::new(source_path, "talk.mp3");
    let segmenter = Segmenter::new(
        Arc::new(WritingExtractor::default()),
        ScratchSpace::in_dir(scratch.path()),
    );

    let segments: Vec<_> = segmenter
        .split(&source, SegmentPlan::new(125.0, 59.0).unwrap())
        .then(|pending| pending.extract())
        .collect()
        .await;

    assert_eq!(segments.len(), 3);
    let segments: Vec<_> = segments.into_iter().map(Result::unwrap).collect();
    assert_eq!(segments[0].index, 0);
    assert_eq!(segments[1].start_offset_seconds, 59.0);
    assert_eq!(segments[2].start_offset_seconds, 118.0);
    assert!((segments[2].duration_seconds - 7.0).abs() < 1e-9);
    for segment in &segments {
        assert!(segment.temp_file_path.exists());
        assert!(segment.temp_file_path.starts_with(scratch.path()));
        assert_eq!(
            segment.temp_file_path.extension().and_then(|e| e.to_str()),
            Some("mp3")
        );
    }

    for segment in segments {
        segment.release();
    }
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn given_segment_when_released_then_scratch_directory_is_removed() {
    let work = tempfile::TempDir::new().unwrap();
    let scratch = tempfile::TempDir::new().unwrap();
    let source = AudioSource::new(write_source(work.path(), "a.wav", b"x"), "a.wav");
    let segmenter = Segmenter::new(
        Arc::new(WritingExtractor::default()),
        ScratchSpace::in_dir(scratch.path()),
    );
    let window = SegmentWindow {
        index: 4,
        start_offset_seconds: 236.0,
        duration_seconds: 59.0,
    };

    let segment = segmenter.extract(&source, window).await.unwrap();
    let dir = segment.temp_file_path.parent().unwrap().to_path_buf();
    assert_eq!(segment.read().await.unwrap(), b"start=236");
    assert_eq!(segment.index, 4);
    assert_eq!(segment.start_offset_seconds, 236.0);

    segment.release();

    assert!(!dir.exists());
}

#[tokio::test]
async fn given_failing_extractor_when_extracting_then_returns_error_and_leaves_no_scratch() {
    let work = tempfile::TempDir::new().unwrap();
    let scratch = tempfile::TempDir::new().unwrap();
    let source = AudioSource::new(write_source(work.path(), "a.wav", b"x"), "a.wav");
    let segmenter = Segmenter::new(
        Arc::new(WritingExtractor::failing_at(&[0])),
        ScratchSpace::in_dir(scratch.path()),
    );
    let window = SegmentWindow {
        index: 0,
        start_offset_seconds: 0.0,
        duration_seconds: 59.0,
    };

    let result = segmenter.extract(&source, window).await;

    assert!(matches!(
        result,
        Err(SegmentExtractionError::ExtractionFailed(_))
    ));
    assert!(scratch_is_empty(scratch.path()));
}

#[tokio::test]
async fn given_split_plan_when_not_awaited_then_nothing_is_extracted() {
    let work = tempfile::TempDir::new().unwrap();
    let scratch = tempfile::TempDir::new().unwrap();
    let source = AudioSource::new(write_source(work.path(), "a.wav", b"x"), "a.wav");
    let extractor = Arc::new(WritingExtractor::default());
    let segmenter = Segmenter::new(extractor.clone(), ScratchSpace::in_dir(scratch.path()));

    let mut pending = segmenter.split(&source, SegmentPlan::new(300.0, 59.0).unwrap());
    let first = pending.next().await.unwrap();
    let second = pending.next().await.unwrap();

    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    assert!(scratch_is_empty(scratch.path()));
    assert_eq!(second.window.start_offset_seconds, 59.0);

    let segment = first.extract().await.unwrap();

    assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    assert_eq!(segment.index, 0);
    segment.release();
}
