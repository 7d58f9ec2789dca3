mod audio_encoding;
mod audio_properties;
mod audio_source;
mod poll_policy;
mod recognition_config;
mod segment_plan;
mod segment_result;
mod storage_path;
mod transcription_outcome;
mod upload_id;

pub use audio_encoding::AudioEncoding;
pub use audio_properties::AudioProperties;
pub use audio_source::{AudioSource, extension_of};
pub use poll_policy::PollPolicy;
pub use recognition_config::{
    DEFAULT_CHUNK_DURATION_SECONDS, DEFAULT_LANGUAGE_CODE, RecognitionConfig, RecognitionParams,
};
pub use segment_plan::{SegmentPlan, SegmentPlanError, SegmentWindow, segment_count};
pub use segment_result::{SegmentErrorKind, SegmentFailure, SegmentResult};
pub use storage_path::StoragePath;
pub use transcription_outcome::{TRANSCRIPT_SEPARATOR, TranscriptionOutcome};
pub use upload_id::UploadId;
