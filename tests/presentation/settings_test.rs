use std::time::Duration;

use chunkscribe::application::services::SubmissionStrategy;
use chunkscribe::domain::AudioEncoding;
use chunkscribe::infrastructure::recognition::RecognitionProvider;
use chunkscribe::presentation::config::{Settings, SettingsError};

#[test]
fn given_default_settings_when_validating_then_passes_with_documented_defaults() {
    let settings = Settings::default();

    assert!(settings.validate().is_ok());
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.chunking.chunk_duration_seconds, 59.0);
    assert_eq!(settings.chunking.max_concurrent_segments, 1);
    assert_eq!(settings.recognition.language_code, "kn-IN");
    assert_eq!(settings.recognition_provider(), RecognitionProvider::Google);
    assert_eq!(settings.submission_strategy(), SubmissionStrategy::Chunked);
    assert_eq!(settings.max_upload_bytes(), 200 * 1024 * 1024);
}

#[test]
fn given_default_settings_when_building_policies_then_uses_configured_intervals() {
    let settings = Settings::default();

    let visibility = settings.visibility_policy();
    let options = settings.recognizer_options();

    assert_eq!(visibility.initial_interval, Duration::from_secs(1));
    assert_eq!(visibility.max_interval, Duration::from_secs(10));
    assert_eq!(visibility.timeout, Duration::from_secs(300));
    assert_eq!(options.operation_poll_interval, Duration::from_secs(10));
    assert_eq!(options.operation_timeout, Duration::from_secs(300));
}

#[test]
fn given_service_account_key_when_building_recognizer_options_then_passes_it_through() {
    let mut settings = Settings::default();
    settings.recognition.service_account_key_base64 = Some("eyJ0eXBlIjoic2EifQ==".to_string());
    settings.recognition.request_timeout_secs = 30;

    let options = settings.recognizer_options();

    assert_eq!(
        options.service_account_key_base64.as_deref(),
        Some("eyJ0eXBlIjoic2EifQ==")
    );
    assert_eq!(options.request_timeout, Duration::from_secs(30));
    assert!(options.api_key.is_none());
}

#[test]
fn given_zero_chunk_duration_when_validating_then_rejects_it() {
    let mut settings = Settings::default();
    settings.chunking.chunk_duration_seconds = 0.0;

    assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
}

#[test]
fn given_zero_concurrency_when_validating_then_rejects_it() {
    let mut settings = Settings::default();
    settings.chunking.max_concurrent_segments = 0;

    assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
}

#[test]
fn given_encoding_override_when_building_config_then_parses_label() {
    let mut settings = Settings::default();
    settings.recognition.encoding_override = Some("ogg_opus".to_string());

    let config = settings.recognition_config().unwrap();

    assert_eq!(config.encoding_override, Some(AudioEncoding::OggOpus));
}

#[test]
fn given_unknown_encoding_override_when_validating_then_rejects_it() {
    let mut settings = Settings::default();
    settings.recognition.encoding_override = Some("WMA".to_string());

    assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
}

#[test]
fn given_blank_encoding_override_when_building_config_then_ignores_it() {
    let mut settings = Settings::default();
    settings.recognition.encoding_override = Some("  ".to_string());

    assert_eq!(settings.recognition_config().unwrap().encoding_override, None);
}
