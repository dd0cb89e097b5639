mod interaction_service;
mod transcription_service;

pub use interaction_service::{CommandOutcome, InteractionService, RejectReason};
pub use transcription_service::{TranscriptionService, TranscriptionServiceError};
