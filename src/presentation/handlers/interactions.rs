use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{Interaction, InteractionType};
use crate::infrastructure::crypto::verify_signature;
use crate::presentation::state::AppState;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Callback discriminant answering a ping event.
const CALLBACK_PONG: u8 = 1;

#[derive(Serialize)]
pub struct PongResponse {
    #[serde(rename = "type")]
    kind: u8,
}

/// Webhook entrypoint for the interactions endpoint. The body is taken raw
/// because the signature covers its exact bytes; parsing happens only after
/// verification passes.
#[tracing::instrument(skip(state, headers, body))]
pub async fn interactions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = header_value(&headers, SIGNATURE_HEADER);
    let timestamp = header_value(&headers, TIMESTAMP_HEADER);
    let (signature, timestamp) = match (signature, timestamp) {
        (Some(signature), Some(timestamp)) => (signature, timestamp),
        _ => {
            tracing::warn!("Interaction request without signature headers");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    if !verify_signature(
        &body,
        signature,
        timestamp,
        &state.settings.discord.public_key,
    ) {
        tracing::warn!("Interaction request failed signature verification");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse interaction body");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match interaction.kind {
        InteractionType::Ping => {
            tracing::debug!(id = %interaction.id, "Answering ping");
            (StatusCode::OK, Json(PongResponse { kind: CALLBACK_PONG })).into_response()
        }
        InteractionType::ApplicationCommand => {
            tracing::info!(id = %interaction.id, "Dispatching application command");
            let service = Arc::clone(&state.interaction_service);
            // Acknowledged before the reply flow runs; the spawned task
            // carries the defer, transcribe, edit sequence to its end.
            tokio::spawn(async move {
                service.handle_command(interaction).await;
            });
            StatusCode::ACCEPTED.into_response()
        }
        InteractionType::Other(kind) => {
            tracing::debug!(kind, "Ignoring unhandled interaction type");
            StatusCode::ACCEPTED.into_response()
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
