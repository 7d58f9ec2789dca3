use std::sync::Arc;

use futures::StreamExt;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{AudioPayload, SpeechRecognizer, StagingStore};
use crate::domain::{AudioSource, PollPolicy, RecognitionParams, StoragePath, TranscriptionOutcome};

use super::cancellation::until_cancelled;
use super::staging_poller::{StagingWaitError, wait_until_visible};
use super::transcription_service::TranscriptionError;

/// Uploads the whole source to object storage and recognizes it by reference.
///
/// Any failure on this path is fatal for the request. The staged object is
/// deleted afterwards on both success and failure.
pub struct StagedTranscriber {
    store: Arc<dyn StagingStore>,
    recognizer: Arc<dyn SpeechRecognizer>,
    visibility: PollPolicy,
}

impl StagedTranscriber {
    pub fn new(
        store: Arc<dyn StagingStore>,
        recognizer: Arc<dyn SpeechRecognizer>,
        visibility: PollPolicy,
    ) -> Self {
        Self {
            store,
            recognizer,
            visibility,
        }
    }

    pub async fn transcribe(
        &self,
        source: &AudioSource,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let path = StoragePath::new(&source.upload_id, &format!("source{}", source.extension()));

        let file = tokio::fs::File::open(source.path()).await?;
        let content_length = file.metadata().await.ok().map(|m| m.len());
        let stream = ReaderStream::new(file).boxed();

        // A failed or interrupted upload may still leave a partial object.
        let result = match until_cancelled(cancel, self.store.store(&path, stream, content_length))
            .await
        {
            None => Err(TranscriptionError::Cancelled),
            Some(Err(e)) => Err(e.into()),
            Some(Ok(stored)) => {
                tracing::info!(
                    path = %path,
                    bytes = stored,
                    "Source staged for long-running recognition"
                );
                self.recognize_staged(&path, params, cancel).await
            }
        };

        self.discard(&path).await;
        result
    }

    async fn discard(&self, path: &StoragePath) {
        if let Err(e) = self.store.delete(path).await {
            tracing::warn!(error = %e, path = %path, "Failed to delete staged source");
        }
    }

    async fn recognize_staged(
        &self,
        path: &StoragePath,
        params: &RecognitionParams,
        cancel: &CancellationToken,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        wait_until_visible(self.store.as_ref(), path, self.visibility, cancel)
            .await
            .map_err(|e| match e {
                StagingWaitError::Timeout { waited_secs, .. } => {
                    TranscriptionError::StagingTimeout(waited_secs)
                }
                StagingWaitError::Cancelled => TranscriptionError::Cancelled,
            })?;

        let payload = AudioPayload::Staged {
            uri: self.store.uri(path),
        };
        let transcript = until_cancelled(cancel, self.recognizer.recognize(&payload, params))
            .await
            .ok_or(TranscriptionError::Cancelled)??;

        tracing::info!(chars = transcript.len(), "Staged recognition completed");
        Ok(TranscriptionOutcome::complete(transcript))
    }
}
