use chunkscribe::domain::{AudioSource, extension_of};

#[test]
fn given_mixed_case_extension_when_creating_source_then_extension_is_lowercased() {
    let source = AudioSource::new("/tmp/upload.MP3", "Lecture One.MP3");

    assert_eq!(source.extension(), ".mp3");
    assert_eq!(source.original_filename(), "Lecture One.MP3");
    assert_eq!(source.path().to_str(), Some("/tmp/upload.MP3"));
}

#[test]
fn given_filename_without_extension_when_extracting_then_returns_empty() {
    assert_eq!(extension_of("recording"), "");
}

#[test]
fn given_extension_with_path_characters_when_extracting_then_rejects_it() {
    assert_eq!(extension_of("audio.wa/v"), "");
}

#[test]
fn given_two_sources_when_created_then_upload_ids_differ() {
    let a = AudioSource::new("/tmp/a.wav", "a.wav");
    let b = AudioSource::new("/tmp/b.wav", "b.wav");

    assert_ne!(a.upload_id, b.upload_id);
}
