use serde::Deserialize;

const AUDIO_MIME_PREFIX: &str = "audio/";

/// A media resource referenced by a message.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub waveform: Option<String>,
}

impl Attachment {
    pub fn is_audio(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with(AUDIO_MIME_PREFIX))
    }

    /// Voice messages carry both a duration and a waveform; a plain audio
    /// file upload has neither.
    pub fn is_voice_message(&self) -> bool {
        self.duration_secs.is_some() && self.waveform.is_some()
    }
}
