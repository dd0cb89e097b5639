use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use scribe::application::services::{InteractionService, TranscriptionService};
use scribe::domain::CdnProxy;
use scribe::infrastructure::audio::{HttpAudioFetcher, WorkersAiWhisperEngine};
use scribe::infrastructure::discord::DiscordRestClient;
use scribe::infrastructure::observability::{TracingConfig, init_tracing};
use scribe::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("loading configuration")?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let reply_client = Arc::new(DiscordRestClient::new(&settings.discord.api_base_url));
    let audio_fetcher = Arc::new(HttpAudioFetcher::new());
    let engine = Arc::new(WorkersAiWhisperEngine::new(
        &settings.transcription.api_base_url,
        &settings.transcription.account_id,
        &settings.transcription.api_token,
        &settings.transcription.model,
    ));

    let transcription_service = Arc::new(TranscriptionService::new(audio_fetcher, engine));
    let interaction_service = Arc::new(InteractionService::new(
        reply_client,
        Arc::clone(&transcription_service),
        CdnProxy::new(settings.discord.cdn_proxy_url.clone()),
    ));

    let state = AppState {
        interaction_service,
        transcription_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("parsing listen address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
