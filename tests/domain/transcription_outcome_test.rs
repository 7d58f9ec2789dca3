use chunkscribe::domain::{
    SegmentErrorKind, SegmentFailure, SegmentResult, TRANSCRIPT_SEPARATOR, TranscriptionOutcome,
};

fn failure() -> SegmentFailure {
    SegmentFailure::new(SegmentErrorKind::Recognition, "quota exceeded")
}

#[test]
fn given_results_out_of_order_when_assembling_then_joins_by_index() {
    let results = vec![
        SegmentResult::transcribed(2, "third".to_string()),
        SegmentResult::transcribed(0, "first".to_string()),
        SegmentResult::transcribed(1, "second".to_string()),
    ];

    let outcome = TranscriptionOutcome::from_segments(results);

    assert_eq!(outcome.full_transcript, "first\nsecond\nthird");
    assert!(!outcome.is_partial());
}

#[test]
fn given_failed_segment_when_assembling_then_omits_text_and_records_index() {
    let results = vec![
        SegmentResult::transcribed(0, "t0".to_string()),
        SegmentResult::transcribed(1, "t1".to_string()),
        SegmentResult::failed(2, failure()),
        SegmentResult::transcribed(3, "t3".to_string()),
        SegmentResult::transcribed(4, "t4".to_string()),
    ];

    let outcome = TranscriptionOutcome::from_segments(results);

    assert_eq!(outcome.full_transcript, "t0\nt1\nt3\nt4");
    assert_eq!(outcome.failed_segments, vec![2]);
    assert!(outcome.is_partial());
}

#[test]
fn given_single_segment_when_assembling_then_has_no_separator() {
    let outcome =
        TranscriptionOutcome::from_segments(vec![SegmentResult::transcribed(0, "only".to_string())]);

    assert_eq!(outcome.full_transcript, "only");
    assert!(!outcome.full_transcript.contains(TRANSCRIPT_SEPARATOR));
}

#[test]
fn given_failure_when_displayed_then_includes_kind() {
    assert_eq!(failure().to_string(), "RECOGNITION: quota exceeded");
}
