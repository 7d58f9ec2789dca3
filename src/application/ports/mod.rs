mod media_prober;
mod segment_extractor;
mod speech_recognizer;
mod staging_store;

pub use media_prober::{MediaProbeError, MediaProber};
pub use segment_extractor::{SegmentExtractionError, SegmentExtractor};
pub use speech_recognizer::{AudioPayload, RecognitionError, SpeechRecognizer};
pub use staging_store::{StagingStore, StagingStoreError};
