use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::services::{ScratchSpace, TranscriptionService};
use crate::presentation::config::Settings;

/// Process-wide handles shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub upload_scratch: ScratchSpace,
    pub settings: Arc<Settings>,
    /// Cancelled on server shutdown; each request runs under a child token.
    pub shutdown: CancellationToken,
}
