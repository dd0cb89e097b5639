use std::sync::Arc;

use crate::application::ports::{Reply, ReplyClient};
use crate::application::services::TranscriptionService;
use crate::domain::{CdnProxy, CommandKind, Interaction, InteractionHandle, MessageLink};

/// Longest voice message the hosted model is asked to transcribe.
const MAX_AUDIO_DURATION_SECS: f64 = 70.0;

const VOICE_MESSAGES_ONLY: &str = "Audio transcription only works on voice messages!";
const SOMETHING_WENT_WRONG: &str = "Something went wrong! Try again later.";
const TRANSCRIPT_FAILED: &str =
    "Something went wrong while creating a transcript. Try again later.";

/// Terminal state of one handled command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not a message context-menu command, or its target did not resolve:
    /// dropped without any reply.
    Ignored,
    /// A guard failed; the user got an immediate ephemeral reply.
    Rejected(RejectReason),
    /// Deferred, transcribed, and edited with the transcript.
    Transcribed,
    /// The defer, transcription, or delivery failed after the guards passed.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Missing attachment, non-audio content type, or no voice-message
    /// metadata. One shared user message covers all three.
    NotAVoiceMessage,
    /// Voice message exceeds the transcription ceiling.
    TooLong,
    /// The attachment URL could not be rewritten onto the proxy.
    ProxyRewrite,
}

pub struct InteractionService {
    reply_client: Arc<dyn ReplyClient>,
    transcription: Arc<TranscriptionService>,
    cdn_proxy: CdnProxy,
}

impl InteractionService {
    pub fn new(
        reply_client: Arc<dyn ReplyClient>,
        transcription: Arc<TranscriptionService>,
        cdn_proxy: CdnProxy,
    ) -> Self {
        Self {
            reply_client,
            transcription,
            cdn_proxy,
        }
    }

    /// Runs one application-command interaction through the guard chain
    /// and, if it qualifies, the defer, transcribe, edit sequence.
    pub async fn handle_command(&self, interaction: Interaction) -> CommandOutcome {
        let data = match interaction.data.as_ref() {
            Some(data) => data,
            None => {
                tracing::warn!(id = %interaction.id, "Command interaction without data");
                return CommandOutcome::Ignored;
            }
        };

        if data.kind != CommandKind::Message {
            tracing::debug!(
                command = %data.name,
                kind = ?data.kind,
                "Ignoring non-message command"
            );
            return CommandOutcome::Ignored;
        }

        let target = match data.target_message() {
            Some(target) => target,
            None => {
                tracing::warn!(id = %interaction.id, "Target message did not resolve");
                return CommandOutcome::Ignored;
            }
        };

        let handle = interaction.handle();

        let attachment = match target.attachments.first() {
            Some(attachment) => attachment,
            None => {
                self.reject(&handle, VOICE_MESSAGES_ONLY).await;
                return CommandOutcome::Rejected(RejectReason::NotAVoiceMessage);
            }
        };

        if !attachment.is_audio() {
            self.reject(&handle, VOICE_MESSAGES_ONLY).await;
            return CommandOutcome::Rejected(RejectReason::NotAVoiceMessage);
        }

        if !attachment.is_voice_message() {
            self.reject(&handle, VOICE_MESSAGES_ONLY).await;
            return CommandOutcome::Rejected(RejectReason::NotAVoiceMessage);
        }

        if attachment
            .duration_secs
            .is_some_and(|secs| secs > MAX_AUDIO_DURATION_SECS)
        {
            let content = format!(
                "Sorry, the audio message is too long! (Max: {} seconds)",
                MAX_AUDIO_DURATION_SECS
            );
            self.reject(&handle, &content).await;
            return CommandOutcome::Rejected(RejectReason::TooLong);
        }

        let proxied_url = match self.cdn_proxy.proxied_url(&attachment.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "Failed to rewrite attachment URL onto the proxy");
                self.reject(&handle, SOMETHING_WENT_WRONG).await;
                return CommandOutcome::Rejected(RejectReason::ProxyRewrite);
            }
        };

        // The model call can outlast the initial-response window, so the
        // interaction is acknowledged before any audio is downloaded.
        if let Err(e) = self.reply_client.defer_reply(&handle).await {
            tracing::error!(error = %e, "Failed to deliver deferred acknowledgment");
            return CommandOutcome::Failed;
        }

        match self.transcription.transcribe_url(&proxied_url).await {
            Ok(transcript) => {
                let link = MessageLink::new(
                    interaction.guild_id.as_deref(),
                    &target.channel_id,
                    &target.id,
                );
                self.edit(&handle, &transcript_message(&transcript, &link))
                    .await;
                CommandOutcome::Transcribed
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create transcript");
                self.edit(&handle, TRANSCRIPT_FAILED).await;
                CommandOutcome::Failed
            }
        }
    }

    /// Sends an immediate ephemeral rejection. Delivery failures are logged
    /// and not retried.
    async fn reject(&self, handle: &InteractionHandle, content: &str) {
        let reply = Reply::ephemeral(content);
        if let Err(e) = self.reply_client.create_reply(handle, &reply).await {
            tracing::error!(error = %e, "Failed to deliver rejection reply");
        }
    }

    async fn edit(&self, handle: &InteractionHandle, content: &str) {
        if let Err(e) = self.reply_client.edit_reply(handle, content).await {
            tracing::error!(error = %e, "Failed to deliver reply edit");
        }
    }
}

fn transcript_message(transcript: &str, link: &MessageLink) -> String {
    format!(
        "**Transcript:**\n> {}\n\n-# ⚠️ May contain errors/inaccuracies • Original Message: {}",
        transcript, link
    )
}
