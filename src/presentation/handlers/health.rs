use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::SubmissionStrategy;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub submission: &'static str,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let submission = match state.transcription_service.strategy() {
        SubmissionStrategy::Chunked => "chunked",
        SubmissionStrategy::Staged => "staged",
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            submission,
        }),
    )
}
