use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use url::Url;

use scribe::application::ports::{
    AudioFetchError, AudioFetcher, Reply, ReplyClient, ReplyError, TranscriptionEngine,
    TranscriptionError,
};
use scribe::application::services::{
    CommandOutcome, InteractionService, RejectReason, TranscriptionService,
};
use scribe::domain::{
    Attachment, CdnProxy, CommandData, CommandKind, Interaction, InteractionHandle,
    InteractionType, ResolvedData, ResolvedMessage,
};

const VOICE_ONLY_REPLY: &str = "Audio transcription only works on voice messages!";
const GENERIC_REPLY: &str = "Something went wrong! Try again later.";
const TRANSCRIPT_FAILED_REPLY: &str =
    "Something went wrong while creating a transcript. Try again later.";

#[derive(Debug, Clone, PartialEq)]
enum ReplyCall {
    Create { content: String, ephemeral: bool },
    Defer,
    Edit { content: String },
}

#[derive(Default)]
struct RecordingReplyClient {
    calls: Mutex<Vec<ReplyCall>>,
    fail_defer: bool,
}

impl RecordingReplyClient {
    fn failing_defer() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_defer: true,
        }
    }

    fn calls(&self) -> Vec<ReplyCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReplyClient for RecordingReplyClient {
    async fn create_reply(
        &self,
        _handle: &InteractionHandle,
        reply: &Reply,
    ) -> Result<(), ReplyError> {
        self.calls.lock().unwrap().push(ReplyCall::Create {
            content: reply.content.clone(),
            ephemeral: reply.ephemeral,
        });
        Ok(())
    }

    async fn defer_reply(&self, _handle: &InteractionHandle) -> Result<(), ReplyError> {
        self.calls.lock().unwrap().push(ReplyCall::Defer);
        if self.fail_defer {
            return Err(ReplyError::RequestFailed("connection reset".to_string()));
        }
        Ok(())
    }

    async fn edit_reply(
        &self,
        _handle: &InteractionHandle,
        content: &str,
    ) -> Result<(), ReplyError> {
        self.calls.lock().unwrap().push(ReplyCall::Edit {
            content: content.to_string(),
        });
        Ok(())
    }
}

#[derive(Default)]
struct MockAudioFetcher {
    fetched: Mutex<Vec<String>>,
    fail: bool,
}

impl MockAudioFetcher {
    fn failing() -> Self {
        Self {
            fetched: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AudioFetcher for MockAudioFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, AudioFetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(AudioFetchError::UnexpectedStatus(404));
        }
        Ok(b"voice bytes".to_vec())
    }
}

#[derive(Default)]
struct MockEngine {
    calls: Mutex<usize>,
    fail: bool,
}

impl MockEngine {
    fn failing() -> Self {
        Self {
            calls: Mutex::new(0),
            fail: true,
        }
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for MockEngine {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(TranscriptionError::ApiRequestFailed(
                "model exploded".to_string(),
            ));
        }
        Ok("Hello from the mock engine".to_string())
    }
}

fn build_service(
    reply_client: Arc<RecordingReplyClient>,
    audio_fetcher: Arc<MockAudioFetcher>,
    engine: Arc<MockEngine>,
) -> InteractionService {
    let transcription = Arc::new(TranscriptionService::new(audio_fetcher, engine));
    InteractionService::new(
        reply_client,
        transcription,
        CdnProxy::new(Url::parse("https://proxy.example.com/cdn/").unwrap()),
    )
}

fn voice_attachment() -> Attachment {
    Attachment {
        url: "https://cdn.discordapp.com/attachments/1/2/voice-message.ogg".to_string(),
        content_type: Some("audio/ogg".to_string()),
        duration_secs: Some(42.0),
        waveform: Some("AAAA".to_string()),
    }
}

fn command(attachments: Vec<Attachment>) -> Interaction {
    command_of_kind(CommandKind::Message, attachments)
}

fn command_of_kind(kind: CommandKind, attachments: Vec<Attachment>) -> Interaction {
    let mut messages = HashMap::new();
    messages.insert(
        "msg-1".to_string(),
        ResolvedMessage {
            id: "msg-1".to_string(),
            channel_id: "chan-1".to_string(),
            attachments,
        },
    );

    Interaction {
        id: "901".to_string(),
        application_id: "555".to_string(),
        kind: InteractionType::ApplicationCommand,
        token: "tok".to_string(),
        guild_id: Some("guild-1".to_string()),
        data: Some(CommandData {
            name: "Transcribe Voice Message".to_string(),
            kind,
            target_id: Some("msg-1".to_string()),
            resolved: Some(ResolvedData { messages }),
        }),
    }
}

#[tokio::test]
async fn given_voice_message_when_handling_then_defers_and_edits_with_transcript() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::default()),
        Arc::new(MockEngine::default()),
    );

    let outcome = service.handle_command(command(vec![voice_attachment()])).await;

    assert_eq!(outcome, CommandOutcome::Transcribed);

    let calls = reply_client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ReplyCall::Defer);
    match &calls[1] {
        ReplyCall::Edit { content } => {
            assert!(content.starts_with("**Transcript:**\n> Hello from the mock engine"));
            assert!(content.contains("May contain errors/inaccuracies"));
            assert!(content.contains("https://discord.com/channels/guild-1/chan-1/msg-1"));
        }
        other => panic!("expected edit, got {:?}", other),
    }
}

#[tokio::test]
async fn given_voice_message_when_handling_then_downloads_through_the_proxy() {
    let audio_fetcher = Arc::new(MockAudioFetcher::default());
    let engine = Arc::new(MockEngine::default());
    let service = build_service(
        Arc::new(RecordingReplyClient::default()),
        Arc::clone(&audio_fetcher),
        Arc::clone(&engine),
    );

    service.handle_command(command(vec![voice_attachment()])).await;

    assert_eq!(
        audio_fetcher.fetched(),
        vec!["https://proxy.example.com/cdn/attachments/1/2/voice-message.ogg".to_string()]
    );
    assert_eq!(engine.call_count(), 1);
}

#[tokio::test]
async fn given_direct_message_when_handling_then_link_uses_at_me() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::default()),
        Arc::new(MockEngine::default()),
    );
    let mut interaction = command(vec![voice_attachment()]);
    interaction.guild_id = None;

    service.handle_command(interaction).await;

    match &reply_client.calls()[1] {
        ReplyCall::Edit { content } => {
            assert!(content.contains("https://discord.com/channels/@me/chan-1/msg-1"));
        }
        other => panic!("expected edit, got {:?}", other),
    }
}

#[tokio::test]
async fn given_no_attachments_when_handling_then_rejects_without_downloading() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let audio_fetcher = Arc::new(MockAudioFetcher::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::clone(&audio_fetcher),
        Arc::new(MockEngine::default()),
    );

    let outcome = service.handle_command(command(vec![])).await;

    assert_eq!(
        outcome,
        CommandOutcome::Rejected(RejectReason::NotAVoiceMessage)
    );
    assert_eq!(
        reply_client.calls(),
        vec![ReplyCall::Create {
            content: VOICE_ONLY_REPLY.to_string(),
            ephemeral: true,
        }]
    );
    assert!(audio_fetcher.fetched().is_empty());
}

#[tokio::test]
async fn given_non_audio_attachment_when_handling_then_rejects() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::default()),
        Arc::new(MockEngine::default()),
    );
    let mut attachment = voice_attachment();
    attachment.content_type = Some("video/mp4".to_string());

    let outcome = service.handle_command(command(vec![attachment])).await;

    assert_eq!(
        outcome,
        CommandOutcome::Rejected(RejectReason::NotAVoiceMessage)
    );
    assert_eq!(
        reply_client.calls(),
        vec![ReplyCall::Create {
            content: VOICE_ONLY_REPLY.to_string(),
            ephemeral: true,
        }]
    );
}

#[tokio::test]
async fn given_audio_without_voice_metadata_when_handling_then_rejects() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let audio_fetcher = Arc::new(MockAudioFetcher::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::clone(&audio_fetcher),
        Arc::new(MockEngine::default()),
    );
    let mut attachment = voice_attachment();
    attachment.waveform = None;

    let outcome = service.handle_command(command(vec![attachment])).await;

    assert_eq!(
        outcome,
        CommandOutcome::Rejected(RejectReason::NotAVoiceMessage)
    );
    assert!(audio_fetcher.fetched().is_empty());
}

#[tokio::test]
async fn given_duration_at_the_ceiling_when_handling_then_transcribes() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::default()),
        Arc::new(MockEngine::default()),
    );
    let mut attachment = voice_attachment();
    attachment.duration_secs = Some(70.0);

    let outcome = service.handle_command(command(vec![attachment])).await;

    assert_eq!(outcome, CommandOutcome::Transcribed);
}

#[tokio::test]
async fn given_duration_over_the_ceiling_when_handling_then_rejects_as_too_long() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let audio_fetcher = Arc::new(MockAudioFetcher::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::clone(&audio_fetcher),
        Arc::new(MockEngine::default()),
    );
    let mut attachment = voice_attachment();
    attachment.duration_secs = Some(70.5);

    let outcome = service.handle_command(command(vec![attachment])).await;

    assert_eq!(outcome, CommandOutcome::Rejected(RejectReason::TooLong));
    assert_eq!(
        reply_client.calls(),
        vec![ReplyCall::Create {
            content: "Sorry, the audio message is too long! (Max: 70 seconds)".to_string(),
            ephemeral: true,
        }]
    );
    assert!(audio_fetcher.fetched().is_empty());
}

#[tokio::test]
async fn given_attachment_off_the_platform_cdn_when_handling_then_rejects_generically() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let audio_fetcher = Arc::new(MockAudioFetcher::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::clone(&audio_fetcher),
        Arc::new(MockEngine::default()),
    );
    let mut attachment = voice_attachment();
    attachment.url = "https://evil.example.com/attachments/1/2/a.ogg".to_string();

    let outcome = service.handle_command(command(vec![attachment])).await;

    assert_eq!(outcome, CommandOutcome::Rejected(RejectReason::ProxyRewrite));
    assert_eq!(
        reply_client.calls(),
        vec![ReplyCall::Create {
            content: GENERIC_REPLY.to_string(),
            ephemeral: true,
        }]
    );
    assert!(audio_fetcher.fetched().is_empty());
}

#[tokio::test]
async fn given_non_message_command_when_handling_then_ignored_without_replies() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::default()),
        Arc::new(MockEngine::default()),
    );

    let outcome = service
        .handle_command(command_of_kind(CommandKind::User, vec![voice_attachment()]))
        .await;

    assert_eq!(outcome, CommandOutcome::Ignored);
    assert!(reply_client.calls().is_empty());
}

#[tokio::test]
async fn given_unresolved_target_when_handling_then_ignored() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::default()),
        Arc::new(MockEngine::default()),
    );
    let mut interaction = command(vec![voice_attachment()]);
    if let Some(data) = interaction.data.as_mut() {
        data.target_id = Some("somewhere-else".to_string());
    }

    let outcome = service.handle_command(interaction).await;

    assert_eq!(outcome, CommandOutcome::Ignored);
    assert!(reply_client.calls().is_empty());
}

#[tokio::test]
async fn given_download_failure_when_handling_then_edits_with_generic_error() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let engine = Arc::new(MockEngine::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::failing()),
        Arc::clone(&engine),
    );

    let outcome = service.handle_command(command(vec![voice_attachment()])).await;

    assert_eq!(outcome, CommandOutcome::Failed);
    assert_eq!(
        reply_client.calls(),
        vec![
            ReplyCall::Defer,
            ReplyCall::Edit {
                content: TRANSCRIPT_FAILED_REPLY.to_string(),
            },
        ]
    );
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn given_model_failure_when_handling_then_edit_does_not_leak_the_error() {
    let reply_client = Arc::new(RecordingReplyClient::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::new(MockAudioFetcher::default()),
        Arc::new(MockEngine::failing()),
    );

    let outcome = service.handle_command(command(vec![voice_attachment()])).await;

    assert_eq!(outcome, CommandOutcome::Failed);
    match &reply_client.calls()[1] {
        ReplyCall::Edit { content } => {
            assert_eq!(content, TRANSCRIPT_FAILED_REPLY);
            assert!(!content.contains("model exploded"));
        }
        other => panic!("expected edit, got {:?}", other),
    }
}

#[tokio::test]
async fn given_defer_failure_when_handling_then_stops_before_downloading() {
    let reply_client = Arc::new(RecordingReplyClient::failing_defer());
    let audio_fetcher = Arc::new(MockAudioFetcher::default());
    let service = build_service(
        Arc::clone(&reply_client),
        Arc::clone(&audio_fetcher),
        Arc::new(MockEngine::default()),
    );

    let outcome = service.handle_command(command(vec![voice_attachment()])).await;

    assert_eq!(outcome, CommandOutcome::Failed);
    assert_eq!(reply_client.calls(), vec![ReplyCall::Defer]);
    assert!(audio_fetcher.fetched().is_empty());
}
