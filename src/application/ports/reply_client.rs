use async_trait::async_trait;

use crate::domain::InteractionHandle;

/// A user-visible message sent in direct response to an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
}

impl Reply {
    /// A reply visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

#[async_trait]
pub trait ReplyClient: Send + Sync {
    /// Answer the interaction immediately with a message.
    async fn create_reply(
        &self,
        handle: &InteractionHandle,
        reply: &Reply,
    ) -> Result<(), ReplyError>;

    /// Acknowledge the interaction with a placeholder, promising an edit
    /// with the real content later.
    async fn defer_reply(&self, handle: &InteractionHandle) -> Result<(), ReplyError>;

    /// Replace the deferred placeholder with final content.
    async fn edit_reply(&self, handle: &InteractionHandle, content: &str) -> Result<(), ReplyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
