use std::collections::HashMap;

use serde::Deserialize;

use super::attachment::Attachment;

/// Discriminant of an inbound interaction, as sent in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    /// Component presses, autocompletes, modals: acknowledged but not handled.
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            other => Self::Other(other),
        }
    }
}

/// Kind of application command an interaction carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum CommandKind {
    ChatInput,
    User,
    Message,
    Other(u8),
}

impl From<u8> for CommandKind {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::ChatInput,
            2 => Self::User,
            3 => Self::Message,
            other => Self::Other(other),
        }
    }
}

/// One inbound interaction event, deserialized from the raw webhook body.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub application_id: String,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub token: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub data: Option<CommandData>,
}

impl Interaction {
    /// The token bundle authorizing this interaction's reply sequence.
    pub fn handle(&self) -> InteractionHandle {
        InteractionHandle {
            id: self.id.clone(),
            application_id: self.application_id.clone(),
            token: self.token.clone(),
        }
    }
}

/// Command payload of an application-command interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandKind,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub resolved: Option<ResolvedData>,
}

impl CommandData {
    /// The message a context-menu command was invoked on, if it resolved.
    pub fn target_message(&self) -> Option<&ResolvedMessage> {
        let target_id = self.target_id.as_ref()?;
        self.resolved.as_ref()?.messages.get(target_id)
    }
}

/// Entities the platform resolved for the command. Message context-menu
/// commands put their target under `messages`, keyed by message id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolvedData {
    #[serde(default)]
    pub messages: HashMap<String, ResolvedMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedMessage {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Routing identifiers for one interaction's replies: the initial callback
/// is addressed by interaction id, later edits by application id, and both
/// carry the per-interaction token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionHandle {
    pub id: String,
    pub application_id: String,
    pub token: String,
}
