use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use tokio::io::AsyncWriteExt;

use crate::application::services::{ScratchDir, ScratchSpace};
use crate::domain::extension_of;

pub const AUDIO_FIELD: &str = "audio";

/// An uploaded file spooled to scratch storage; removed on drop.
#[derive(Debug)]
pub struct ReceivedUpload {
    pub filename: String,
    pub size_bytes: u64,
    path: PathBuf,
    _scratch: ScratchDir,
}

impl ReceivedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormParseError {
    #[error("no audio file in upload")]
    NoFile,
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("failed to spool upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Spools the `audio` field, or the first file field if none is named
/// `audio`, to a fresh scratch directory. Other fields are ignored.
pub async fn receive_upload(
    scratch: &ScratchSpace,
    multipart: &mut Multipart,
) -> Result<ReceivedUpload, FormParseError> {
    while let Some(field) = multipart.next_field().await? {
        let is_audio = field.name() == Some(AUDIO_FIELD);
        let is_file = field.file_name().is_some();
        if !is_audio && !is_file {
            tracing::debug!(field = ?field.name(), "Ignoring non-file form field");
            continue;
        }

        let filename = field
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or("upload")
            .to_string();

        return spool(scratch, field, filename).await;
    }

    Err(FormParseError::NoFile)
}

async fn spool(
    scratch: &ScratchSpace,
    mut field: Field<'_>,
    filename: String,
) -> Result<ReceivedUpload, FormParseError> {
    let dir = scratch.allocate("upload-")?;
    let path = dir.path().join(format!("upload{}", extension_of(&filename)));

    let mut file = tokio::fs::File::create(&path).await?;
    let mut size_bytes: u64 = 0;
    while let Some(chunk) = field.chunk().await? {
        size_bytes += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    tracing::debug!(filename = %filename, bytes = size_bytes, "Upload spooled");

    Ok(ReceivedUpload {
        filename,
        size_bytes,
        path,
        _scratch: dir,
    })
}
