use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose;

use chunkscribe::application::ports::{AudioPayload, RecognitionError};
use chunkscribe::domain::{AudioEncoding, RecognitionParams};
use chunkscribe::infrastructure::recognition::{
    RecognitionProvider, RecognizerFactory, RecognizerOptions,
};

fn options() -> RecognizerOptions {
    RecognizerOptions {
        request_timeout: Duration::from_secs(5),
        operation_poll_interval: Duration::from_secs(1),
        operation_timeout: Duration::from_secs(10),
        ..RecognizerOptions::default()
    }
}

#[test]
fn given_google_without_credentials_when_creating_then_returns_misconfigured() {
    let result = RecognizerFactory::create(RecognitionProvider::Google, options());

    assert!(matches!(result, Err(RecognitionError::Misconfigured(_))));
}

#[test]
fn given_google_with_api_key_when_creating_then_succeeds() {
    let result = RecognizerFactory::create(
        RecognitionProvider::Google,
        RecognizerOptions {
            api_key: Some("key".to_string()),
            ..options()
        },
    );

    assert!(result.is_ok());
}

#[test]
fn given_google_with_undecodable_service_account_key_when_creating_then_prefers_it_and_fails() {
    let result = RecognizerFactory::create(
        RecognitionProvider::Google,
        RecognizerOptions {
            api_key: Some("key".to_string()),
            access_token: Some("token".to_string()),
            service_account_key_base64: Some("not base64!!".to_string()),
            ..options()
        },
    );

    assert!(matches!(result, Err(RecognitionError::Misconfigured(_))));
}

#[test]
fn given_google_with_malformed_service_account_json_when_creating_then_returns_misconfigured() {
    let encoded = general_purpose::STANDARD.encode(r#"{"type":"service_account"}"#);

    let result = RecognizerFactory::create(
        RecognitionProvider::Google,
        RecognizerOptions {
            service_account_key_base64: Some(encoded),
            ..options()
        },
    );

    assert!(matches!(result, Err(RecognitionError::Misconfigured(_))));
}

#[test]
fn given_openai_with_key_when_creating_then_succeeds() {
    let result = RecognizerFactory::create(
        RecognitionProvider::OpenAi,
        RecognizerOptions {
            api_key: Some("key".to_string()),
            ..options()
        },
    );

    assert!(result.is_ok());
}

#[test]
fn given_openai_without_key_when_creating_then_returns_misconfigured() {
    let result = RecognizerFactory::create(RecognitionProvider::OpenAi, options());

    assert!(matches!(result, Err(RecognitionError::Misconfigured(_))));
}

#[tokio::test]
async fn given_mock_provider_when_recognizing_then_returns_canned_transcript() {
    let recognizer = RecognizerFactory::create(RecognitionProvider::Mock, options()).unwrap();
    let params = RecognitionParams {
        encoding: AudioEncoding::Linear16,
        sample_rate_hertz: 8_000,
        audio_channel_count: 1,
        language_code: "kn-IN".to_string(),
    };

    let transcript = recognizer
        .recognize(&AudioPayload::Inline(vec![0; 4]), &params)
        .await
        .unwrap();

    assert!(transcript.contains("kn-IN"));
    assert!(transcript.contains("LINEAR16"));
}
