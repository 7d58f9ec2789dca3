mod health;
mod transcribe;
mod upload;

pub use health::health_handler;
pub use transcribe::{ErrorResponse, TranscriptionResponse, transcribe_handler};
pub use upload::{AUDIO_FIELD, FormParseError, ReceivedUpload, receive_upload};
