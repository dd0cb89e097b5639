use std::sync::Arc;

use crate::application::services::{InteractionService, TranscriptionService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub interaction_service: Arc<InteractionService>,
    pub transcription_service: Arc<TranscriptionService>,
    pub settings: Settings,
}
