use std::path::{Path, PathBuf};

use super::UploadId;

/// An uploaded audio file on local scratch storage.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSource {
    pub upload_id: UploadId,
    path: PathBuf,
    extension: String,
    original_filename: String,
}

impl AudioSource {
    pub fn new(path: impl Into<PathBuf>, original_filename: impl Into<String>) -> Self {
        let original_filename = original_filename.into();
        let extension = extension_of(&original_filename);
        Self {
            upload_id: UploadId::new(),
            path: path.into(),
            extension,
            original_filename,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase extension including the leading dot, or empty when the upload had none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }
}

pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
