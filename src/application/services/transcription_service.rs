use std::sync::Arc;

use url::Url;

use crate::application::ports::{
    AudioFetchError, AudioFetcher, TranscriptionEngine, TranscriptionError,
};

/// Downloads an audio resource and runs it through the speech-to-text
/// model. One download, one model call, nothing retried.
pub struct TranscriptionService {
    audio_fetcher: Arc<dyn AudioFetcher>,
    engine: Arc<dyn TranscriptionEngine>,
}

impl TranscriptionService {
    pub fn new(audio_fetcher: Arc<dyn AudioFetcher>, engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self {
            audio_fetcher,
            engine,
        }
    }

    pub async fn transcribe_url(&self, url: &Url) -> Result<String, TranscriptionServiceError> {
        let audio = self
            .audio_fetcher
            .fetch(url)
            .await
            .map_err(TranscriptionServiceError::FetchAudio)?;

        tracing::debug!(bytes = audio.len(), "Audio downloaded");

        let transcript = self
            .engine
            .transcribe(&audio)
            .await
            .map_err(TranscriptionServiceError::ModelOutput)?;

        Ok(transcript)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("fetch audio: {0}")]
    FetchAudio(AudioFetchError),
    #[error("model output: {0}")]
    ModelOutput(TranscriptionError),
}
