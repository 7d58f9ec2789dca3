use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    MediaProbeError, MediaProber, RecognitionError, StagingStoreError,
};
use crate::domain::{
    AudioProperties, AudioSource, RecognitionConfig, RecognitionParams, SegmentErrorKind,
    SegmentPlan, SegmentPlanError, SegmentResult, TranscriptionOutcome,
};

use super::cancellation::until_cancelled;
use super::chunk_transcriber::ChunkTranscriber;
use super::staged_transcriber::StagedTranscriber;

/// How a probed source is submitted to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStrategy {
    /// Split into bounded segments, each recognized inline.
    Chunked,
    /// Inline up to a duration ceiling, staged long-running recognition above it.
    Staged,
}

pub struct TranscriptionService {
    prober: Arc<dyn MediaProber>,
    chunked: ChunkTranscriber,
    staged: Option<StagedTranscriber>,
    inline_max_duration_seconds: f64,
    config: RecognitionConfig,
}

impl TranscriptionService {
    pub fn new(
        prober: Arc<dyn MediaProber>,
        chunked: ChunkTranscriber,
        config: RecognitionConfig,
    ) -> Self {
        Self {
            prober,
            chunked,
            staged: None,
            inline_max_duration_seconds: config.chunk_duration_seconds,
            config,
        }
    }

    pub fn with_staged_submission(
        mut self,
        staged: StagedTranscriber,
        inline_max_duration_seconds: f64,
    ) -> Self {
        self.staged = Some(staged);
        self.inline_max_duration_seconds = inline_max_duration_seconds;
        self
    }

    pub fn strategy(&self) -> SubmissionStrategy {
        if self.staged.is_some() {
            SubmissionStrategy::Staged
        } else {
            SubmissionStrategy::Chunked
        }
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    #[tracing::instrument(
        skip(self, source, cancel),
        fields(
            upload_id = %source.upload_id.as_uuid(),
            filename = %source.original_filename()
        )
    )]
    pub async fn transcribe(
        &self,
        source: &AudioSource,
        cancel: &CancellationToken,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let properties = until_cancelled(cancel, self.probe(source))
            .await
            .ok_or(TranscriptionError::Cancelled)??;

        tracing::info!(
            codec = %properties.codec,
            sample_rate = properties.sample_rate_hertz,
            channels = properties.channel_count,
            duration_secs = properties.duration_seconds,
            "Audio properties probed"
        );

        let params = self.config.params_for(&properties);

        let outcome = match &self.staged {
            Some(staged) if properties.duration_seconds > self.inline_max_duration_seconds => {
                tracing::debug!(encoding = %params.encoding, "Routing to staged submission");
                staged.transcribe(source, &params, cancel).await?
            }
            Some(_) => {
                tracing::debug!(encoding = %params.encoding, "Routing to inline submission");
                self.transcribe_whole(source, &params, cancel).await?
            }
            None if !properties.has_known_duration() => {
                tracing::warn!(
                    duration_secs = properties.duration_seconds,
                    "Source duration unknown, submitting the whole file unsplit"
                );
                self.transcribe_whole(source, &params, cancel).await?
            }
            None => {
                let plan = SegmentPlan::new(
                    properties.duration_seconds,
                    self.config.chunk_duration_seconds,
                )?;
                let results = self
                    .chunked
                    .transcribe_segments(source, plan, &params, cancel)
                    .await;
                self.finish(results, cancel)?
            }
        };

        tracing::info!(
            chars = outcome.full_transcript.len(),
            failed_segments = outcome.failed_segments.len(),
            "Transcription completed"
        );

        Ok(outcome)
    }

    async fn transcribe_whole(
        &self,
        source: &AudioSource,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let result = self.chunked.transcribe_whole(source, params, cancel).await;
        self.finish(vec![result], cancel)
    }

    async fn probe(&self, source: &AudioSource) -> Result<AudioProperties, MediaProbeError> {
        let size = tokio::fs::metadata(source.path())
            .await
            .map_err(|e| MediaProbeError::Unreadable(e.to_string()))?
            .len();
        if size == 0 {
            return Err(MediaProbeError::EmptyFile);
        }

        let properties = self.prober.probe(source.path()).await?;
        if properties.sample_rate_hertz == 0 || properties.channel_count == 0 {
            return Err(MediaProbeError::NoAudioStream);
        }
        Ok(properties)
    }

    fn finish(
        &self,
        results: Vec<SegmentResult>,
        cancel: &CancellationToken,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let cancelled = results.iter().any(|r| {
            r.error()
                .is_some_and(|f| f.kind == SegmentErrorKind::Cancelled)
        });
        if cancel.is_cancelled() || cancelled {
            return Err(TranscriptionError::Cancelled);
        }

        let total = results.len();
        let outcome = TranscriptionOutcome::from_segments(results);
        if total > 0 && outcome.failed_segments.len() == total {
            return Err(TranscriptionError::AllSegmentsFailed(outcome.failed_segments));
        }
        if outcome.is_partial() {
            tracing::warn!(
                failed_segments = ?outcome.failed_segments,
                segments = total,
                "Transcription completed with gaps"
            );
        }
        Ok(outcome)
    }
}

/// Errors that abort a whole request with no partial result.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("probe: {0}")]
    Probe(#[from] MediaProbeError),
    #[error("segment plan: {0}")]
    Plan(#[from] SegmentPlanError),
    #[error("source unreadable: {0}")]
    SourceUnreadable(#[from] std::io::Error),
    #[error("staging store: {0}")]
    Staging(#[from] StagingStoreError),
    #[error("staged upload not visible after {0}s")]
    StagingTimeout(u64),
    #[error("recognition: {0}")]
    Recognition(#[from] RecognitionError),
    #[error("every segment failed: {0:?}")]
    AllSegmentsFailed(Vec<usize>),
    #[error("request cancelled")]
    Cancelled,
}

impl TranscriptionError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Probe(_) => "PROBE_ERROR",
            Self::Plan(_) => "CONFIGURATION_ERROR",
            Self::SourceUnreadable(_) => "SOURCE_UNREADABLE",
            Self::Staging(_) => "STAGING_ERROR",
            Self::StagingTimeout(_) => "STAGING_TIMEOUT",
            Self::Recognition(_) => "RECOGNITION_ERROR",
            Self::AllSegmentsFailed(_) => "ALL_SEGMENTS_FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}
