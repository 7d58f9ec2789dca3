use std::sync::Arc;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::application::ports::{AudioPayload, SpeechRecognizer};
use crate::domain::{
    AudioSource, RecognitionParams, SegmentErrorKind, SegmentFailure, SegmentPlan, SegmentResult,
};

use super::cancellation::until_cancelled;
use super::segmenter::{PendingSegment, Segment, Segmenter};

/// Drives the segmenter and recognizer over every window of a plan.
///
/// Per-segment failures are recorded in that segment's slot and never stop the
/// remaining segments. With `max_concurrent_segments > 1` several segments are
/// in flight at once, but results still come back in index order.
pub struct ChunkTranscriber {
    segmenter: Segmenter,
    recognizer: Arc<dyn SpeechRecognizer>,
    max_concurrent_segments: usize,
}

impl ChunkTranscriber {
    pub fn new(
        segmenter: Segmenter,
        recognizer: Arc<dyn SpeechRecognizer>,
        max_concurrent_segments: usize,
    ) -> Self {
        Self {
            segmenter,
            recognizer,
            max_concurrent_segments: max_concurrent_segments.max(1),
        }
    }

    pub async fn transcribe_segments(
        &self,
        source: &AudioSource,
        plan: SegmentPlan,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> Vec<SegmentResult> {
        let total = plan.len();
        tracing::info!(
            segments = total,
            chunk_secs = plan.chunk_duration_seconds(),
            concurrency = self.max_concurrent_segments,
            encoding = %params.encoding,
            "Splitting source into segments"
        );

        self.segmenter
            .split(source, plan)
            .map(|pending| self.process_segment(pending, total, params, cancel))
            .boxed()
            .buffered(self.max_concurrent_segments)
            .collect()
            .await
    }

    /// Submits the untouched source as segment 0, for files that go inline
    /// without splitting.
    pub async fn transcribe_whole(
        &self,
        source: &AudioSource,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> SegmentResult {
        let audio = match tokio::fs::read(source.path()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return SegmentResult::failed(
                    0,
                    SegmentFailure::new(SegmentErrorKind::SegmentExtraction, e.to_string()),
                );
            }
        };
        self.recognize(0, 1, AudioPayload::Inline(audio), params, cancel)
            .await
    }

    async fn process_segment(
        &self,
        pending: PendingSegment<'_>,
        total: usize,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> SegmentResult {
        let window = pending.window;
        let index = window.index;
        if cancel.is_cancelled() {
            return cancelled(index);
        }

        let span = tracing::info_span!(
            "segment",
            segment = index,
            start_secs = window.start_offset_seconds,
            duration_secs = window.duration_seconds,
        );

        async move {
            let segment = match until_cancelled(cancel, pending.extract()).await {
                None => return cancelled(index),
                Some(Ok(segment)) => segment,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Segment extraction failed");
                    return SegmentResult::failed(
                        index,
                        SegmentFailure::new(SegmentErrorKind::SegmentExtraction, e.to_string()),
                    );
                }
            };

            let result = self.recognize_segment(&segment, total, params, cancel).await;
            segment.release();
            result
        }
        .instrument(span)
        .await
    }

    async fn recognize_segment(
        &self,
        segment: &Segment,
        total: usize,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> SegmentResult {
        let audio = match segment.read().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read extracted segment");
                return SegmentResult::failed(
                    segment.index,
                    SegmentFailure::new(SegmentErrorKind::SegmentExtraction, e.to_string()),
                );
            }
        };

        self.recognize(segment.index, total, AudioPayload::Inline(audio), params, cancel)
            .await
    }

    async fn recognize(
        &self,
        index: usize,
        total: usize,
        payload: AudioPayload,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> SegmentResult {
        tracing::debug!(
            segment = index + 1,
            segments = total,
            sample_rate = params.sample_rate_hertz,
            channels = params.audio_channel_count,
            "Sending segment to recognizer"
        );

        match until_cancelled(cancel, self.recognizer.recognize(&payload, params)).await {
            None => cancelled(index),
            Some(Ok(transcript)) => {
                tracing::info!(
                    segment = index + 1,
                    segments = total,
                    chars = transcript.len(),
                    "Received transcription for segment"
                );
                SegmentResult::transcribed(index, transcript)
            }
            Some(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    segment = index + 1,
                    segments = total,
                    "Error transcribing segment"
                );
                SegmentResult::failed(
                    index,
                    SegmentFailure::new(SegmentErrorKind::Recognition, e.to_string()),
                )
            }
        }
    }
}

fn cancelled(index: usize) -> SegmentResult {
    SegmentResult::failed(
        index,
        SegmentFailure::new(SegmentErrorKind::Cancelled, "request cancelled"),
    )
}
