use super::SegmentResult;

pub const TRANSCRIPT_SEPARATOR: &str = "\n";

/// Final artifact of one transcription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOutcome {
    pub full_transcript: String,
    pub failed_segments: Vec<usize>,
}

impl TranscriptionOutcome {
    pub fn complete(full_transcript: String) -> Self {
        Self {
            full_transcript,
            failed_segments: Vec::new(),
        }
    }

    /// Assembles the outcome keyed by segment index, never by arrival order.
    /// Failed segments contribute no text.
    pub fn from_segments(mut results: Vec<SegmentResult>) -> Self {
        results.sort_by_key(|r| r.index);

        let mut transcripts = Vec::with_capacity(results.len());
        let mut failed_segments = Vec::new();
        for result in &results {
            match &result.outcome {
                Ok(text) => transcripts.push(text.as_str()),
                Err(_) => failed_segments.push(result.index),
            }
        }

        Self {
            full_transcript: transcripts.join(TRANSCRIPT_SEPARATOR),
            failed_segments,
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.failed_segments.is_empty()
    }
}
