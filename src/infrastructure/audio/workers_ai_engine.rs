use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

/// Hosted whisper via the Cloudflare Workers AI REST API. Audio goes up as
/// a raw octet stream; the transcript comes back in the `result` envelope.
pub struct WorkersAiWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl WorkersAiWhisperEngine {
    pub fn new(base_url: &str, account_id: &str, api_token: &str, model: &str) -> Self {
        let endpoint = format!(
            "{}/accounts/{}/ai/run/{}",
            base_url.trim_end_matches('/'),
            account_id,
            model,
        );
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_token: api_token.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RunModelResponse {
    result: Option<WhisperOutput>,
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Deserialize)]
struct WhisperOutput {
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

#[async_trait]
impl TranscriptionEngine for WorkersAiWhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<String, TranscriptionError> {
        tracing::debug!(bytes = audio_data.len(), "Sending audio to Workers AI whisper");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(audio_data.to_vec())
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: RunModelResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        if !result.success {
            let detail = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(TranscriptionError::InvalidResponse(format!(
                "model run unsuccessful: {}",
                detail
            )));
        }

        let output = result.result.ok_or_else(|| {
            TranscriptionError::InvalidResponse("missing result payload".to_string())
        })?;

        tracing::info!(chars = output.text.len(), "Whisper transcription completed");

        Ok(output.text.trim().to_string())
    }
}
