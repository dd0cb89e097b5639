mod http_audio_fetcher;
mod workers_ai_engine;

pub use http_audio_fetcher::HttpAudioFetcher;
pub use workers_ai_engine::WorkersAiWhisperEngine;
