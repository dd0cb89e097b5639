use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DISCORD_API_BASE_URL: &str = "https://discord.com/api/v10";
const DEFAULT_WORKERS_AI_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
const DEFAULT_WHISPER_MODEL: &str = "@cf/openai/whisper";

/// Process configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub discord: DiscordSettings,
    pub transcription: TranscriptionSettings,
    pub api: ApiSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DiscordSettings {
    /// Hex-encoded Ed25519 public key the platform signs webhook calls with.
    pub public_key: String,
    pub api_base_url: String,
    /// Base that platform CDN attachment URLs are re-rooted onto before
    /// download.
    pub cdn_proxy_url: Url,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub account_id: String,
    pub api_token: String,
    pub model: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Bearer token guarding the direct transcription endpoint.
    pub auth_token: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(value) => value.parse().map_err(|_| SettingsError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let cdn_proxy_url = required("CDN_PROXY_URL")?;
        let cdn_proxy_url = Url::parse(&cdn_proxy_url).map_err(|_| SettingsError::Invalid {
            name: "CDN_PROXY_URL",
            value: cdn_proxy_url,
        })?;

        Ok(Self {
            server: ServerSettings {
                host: optional("SERVER_HOST", DEFAULT_HOST),
                port,
            },
            discord: DiscordSettings {
                public_key: required("CLIENT_PUBLIC_KEY")?,
                api_base_url: optional("DISCORD_API_BASE_URL", DEFAULT_DISCORD_API_BASE_URL),
                cdn_proxy_url,
            },
            transcription: TranscriptionSettings {
                account_id: required("CLOUDFLARE_ACCOUNT_ID")?,
                api_token: required("CLOUDFLARE_API_TOKEN")?,
                model: optional("WHISPER_MODEL", DEFAULT_WHISPER_MODEL),
                api_base_url: optional("WORKERS_AI_BASE_URL", DEFAULT_WORKERS_AI_BASE_URL),
            },
            api: ApiSettings {
                auth_token: required("TRANSCRIPTION_API_TOKEN")?,
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name).map_err(|_| SettingsError::Missing(name))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
