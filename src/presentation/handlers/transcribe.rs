use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::Instrument;

use crate::application::services::TranscriptionError;
use crate::domain::{AudioSource, TranscriptionOutcome};
use crate::presentation::state::AppState;

use super::upload::{FormParseError, receive_upload};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResponse {
    pub transcription: String,
    pub failed_segments: Vec<usize>,
    pub status: &'static str,
}

impl From<TranscriptionOutcome> for TranscriptionResponse {
    fn from(outcome: TranscriptionOutcome) -> Self {
        let status = if outcome.is_partial() {
            "partial"
        } else {
            "complete"
        };
        Self {
            transcription: outcome.full_transcript,
            failed_segments: outcome.failed_segments,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_segments: Option<Vec<usize>>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let upload = match receive_upload(&state.upload_scratch, &mut multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            tracing::error!(error = %e, "Could not parse the upload");
            return form_error_response(e);
        }
    };

    tracing::info!(
        filename = %upload.filename,
        bytes = upload.size_bytes,
        "Processing uploaded audio"
    );

    let source = AudioSource::new(upload.path(), upload.filename.clone());
    let service = Arc::clone(&state.transcription_service);

    // The pipeline runs detached so a client disconnect drops only this
    // handler; the guard then cancels the token and the pipeline unwinds at
    // its next suspension point.
    let cancel = state.shutdown.child_token();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let task = tokio::spawn(
        async move {
            let result = service.transcribe(&source, &cancel).await;
            drop(upload);
            if matches!(result, Err(TranscriptionError::Cancelled)) {
                tracing::info!("Transcription cancelled before completion");
            }
            result
        }
        .in_current_span(),
    );

    match task.await {
        Ok(Ok(outcome)) => {
            (StatusCode::OK, Json(TranscriptionResponse::from(outcome))).into_response()
        }
        Ok(Err(e)) => transcription_error_response(e),
        Err(e) => {
            tracing::error!(error = %e, "Transcription task aborted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Transcription task aborted".to_string(),
                    kind: "INTERNAL",
                    failed_segments: None,
                }),
            )
                .into_response()
        }
    }
}

fn form_error_response(e: FormParseError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Could not parse the upload file: {}", e),
            kind: "FORM_PARSE_ERROR",
            failed_segments: None,
        }),
    )
        .into_response()
}

fn transcription_error_response(e: TranscriptionError) -> Response {
    let status = match e {
        TranscriptionError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!(error = %e, kind = e.kind(), "Transcription failed");

    let kind = e.kind();
    let failed_segments = match &e {
        TranscriptionError::AllSegmentsFailed(indices) => Some(indices.clone()),
        _ => None,
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            kind,
            failed_segments,
        }),
    )
        .into_response()
}
