use std::string::FromUtf8Error;

use base64::{Engine as _, engine::general_purpose};

/// Service account JSON is shipped base64-encoded in a single env variable.
pub fn decode_service_account_key(encoded: &str) -> Result<String, ServiceAccountKeyError> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceAccountKeyError {
    #[error("service account key is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("service account key is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
