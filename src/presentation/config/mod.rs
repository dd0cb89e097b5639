mod settings;

pub use settings::{
    ApiSettings, DiscordSettings, ServerSettings, Settings, SettingsError, TranscriptionSettings,
};
