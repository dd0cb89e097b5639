mod audio_fetcher;
mod reply_client;
mod transcription_engine;

pub use audio_fetcher::{AudioFetchError, AudioFetcher};
pub use reply_client::{Reply, ReplyClient, ReplyError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
