use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::infrastructure::crypto::constant_time_eq;
use crate::infrastructure::observability::sanitize_url;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TranscriptionRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub transcript: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Direct transcription of an arbitrary audio URL, guarded by a bearer
/// token rather than a webhook signature.
#[tracing::instrument(skip(state, headers, request))]
pub async fn create_transcription_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TranscriptionRequest>,
) -> Response {
    if !authorized(&headers, &state.settings.api.auth_token) {
        tracing::warn!("Transcription request with missing or wrong bearer token");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let url = match Url::parse(&request.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(error = %e, "Transcription request with unparseable URL");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid url: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(url = %sanitize_url(url.as_str()), "Processing transcription request");

    match state.transcription_service.transcribe_url(&url).await {
        Ok(transcript) => {
            tracing::info!(chars = transcript.len(), "Transcription request successful");
            (StatusCode::OK, Json(TranscriptionResponse { transcript })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Transcription failed. Try again later.".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn authorized(headers: &HeaderMap, expected_token: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| constant_time_eq(token.as_bytes(), expected_token.as_bytes()))
}
