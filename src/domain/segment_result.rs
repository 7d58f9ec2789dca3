use std::fmt;

/// Why a single segment produced no transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentErrorKind {
    SegmentExtraction,
    Recognition,
    Cancelled,
}

impl SegmentErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SegmentExtraction => "SEGMENT_EXTRACTION",
            Self::Recognition => "RECOGNITION",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for SegmentErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFailure {
    pub kind: SegmentErrorKind,
    pub message: String,
}

impl SegmentFailure {
    pub fn new(kind: SegmentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SegmentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentResult {
    pub index: usize,
    pub outcome: Result<String, SegmentFailure>,
}

impl SegmentResult {
    pub fn transcribed(index: usize, transcript: String) -> Self {
        Self {
            index,
            outcome: Ok(transcript),
        }
    }

    pub fn failed(index: usize, failure: SegmentFailure) -> Self {
        Self {
            index,
            outcome: Err(failure),
        }
    }

    pub fn transcript(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(String::as_str)
    }

    pub fn error(&self) -> Option<&SegmentFailure> {
        self.outcome.as_ref().err()
    }
}
