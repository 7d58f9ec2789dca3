mod cancellation;
mod chunk_transcriber;
mod scratch;
mod segmenter;
mod staged_transcriber;
mod staging_poller;
mod transcription_service;

pub use chunk_transcriber::ChunkTranscriber;
pub use scratch::{ScratchDir, ScratchSpace};
pub use segmenter::{PendingSegment, Segment, Segmenter};
pub use staged_transcriber::StagedTranscriber;
pub use staging_poller::{StagingWaitError, wait_until_visible};
pub use transcription_service::{SubmissionStrategy, TranscriptionError, TranscriptionService};
