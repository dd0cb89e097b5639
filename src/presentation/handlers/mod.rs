mod health;
mod interactions;
mod transcriptions;

pub use health::health_handler;
pub use interactions::{SIGNATURE_HEADER, TIMESTAMP_HEADER, interactions_handler};
pub use transcriptions::create_transcription_handler;
