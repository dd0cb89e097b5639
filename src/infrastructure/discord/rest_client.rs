use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{Reply, ReplyClient, ReplyError};
use crate::domain::InteractionHandle;

const USER_AGENT: &str = "Scribe (flavored.dev, 1.0)";

/// Interaction callback discriminants, per the platform wire protocol.
const CALLBACK_CHANNEL_MESSAGE: u8 = 4;
const CALLBACK_DEFERRED_CHANNEL_MESSAGE: u8 = 5;

/// Message flag marking a reply as visible only to the invoking user.
const FLAG_EPHEMERAL: u64 = 1 << 6;

pub struct DiscordRestClient {
    client: reqwest::Client,
    base_url: String,
}

impl DiscordRestClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<(), ReplyError> {
        let response = request
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| ReplyError::RequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ReplyError::UnexpectedStatus { status, body });
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct InteractionCallback<'a> {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<CallbackData<'a>>,
}

#[derive(Serialize)]
struct CallbackData<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<u64>,
}

#[derive(Serialize)]
struct EditMessageBody<'a> {
    content: &'a str,
}

#[async_trait]
impl ReplyClient for DiscordRestClient {
    async fn create_reply(
        &self,
        handle: &InteractionHandle,
        reply: &Reply,
    ) -> Result<(), ReplyError> {
        let url = format!(
            "{}/interactions/{}/{}/callback",
            self.base_url, handle.id, handle.token
        );
        let body = InteractionCallback {
            kind: CALLBACK_CHANNEL_MESSAGE,
            data: Some(CallbackData {
                content: &reply.content,
                flags: reply.ephemeral.then_some(FLAG_EPHEMERAL),
            }),
        };

        tracing::debug!(interaction_id = %handle.id, "Creating interaction reply");
        self.execute(self.client.post(&url).json(&body)).await
    }

    async fn defer_reply(&self, handle: &InteractionHandle) -> Result<(), ReplyError> {
        let url = format!(
            "{}/interactions/{}/{}/callback",
            self.base_url, handle.id, handle.token
        );
        let body = InteractionCallback {
            kind: CALLBACK_DEFERRED_CHANNEL_MESSAGE,
            data: None,
        };

        tracing::debug!(interaction_id = %handle.id, "Deferring interaction reply");
        self.execute(self.client.post(&url).json(&body)).await
    }

    async fn edit_reply(
        &self,
        handle: &InteractionHandle,
        content: &str,
    ) -> Result<(), ReplyError> {
        let url = format!(
            "{}/webhooks/{}/{}/messages/@original",
            self.base_url, handle.application_id, handle.token
        );

        tracing::debug!(interaction_id = %handle.id, "Editing deferred reply");
        self.execute(self.client.patch(&url).json(&EditMessageBody { content }))
            .await
    }
}
