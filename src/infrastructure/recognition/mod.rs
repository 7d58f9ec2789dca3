mod access_token;
mod google_speech_recognizer;
mod mock_recognizer;
mod openai_whisper_recognizer;
mod recognizer_factory;

pub use access_token::{AccessTokenSource, CLOUD_PLATFORM_SCOPE, ServiceAccountTokenSource};
pub use google_speech_recognizer::{
    GoogleCredentials, GoogleSpeechRecognizer, Operation, RecognizeRequest, RecognizeResponse,
};
pub use mock_recognizer::MockSpeechRecognizer;
pub use openai_whisper_recognizer::{OpenAiWhisperRecognizer, upload_descriptor, whisper_language};
pub use recognizer_factory::{RecognitionProvider, RecognizerFactory, RecognizerOptions};
