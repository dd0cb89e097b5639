use url::Url;

/// Origin every platform attachment URL is expected to live under.
pub const DISCORD_CDN_BASE: &str = "https://cdn.discordapp.com/";

/// Rewrites platform CDN attachment URLs onto an operator-configured proxy
/// base, keeping the path and query intact.
#[derive(Debug, Clone)]
pub struct CdnProxy {
    base: Url,
}

impl CdnProxy {
    /// The base path is normalized to end with `/` so joining appends to it
    /// instead of replacing its last segment.
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    pub fn proxied_url(&self, attachment_url: &str) -> Result<Url, ProxiedUrlError> {
        let suffix = attachment_url
            .strip_prefix(DISCORD_CDN_BASE)
            .ok_or_else(|| ProxiedUrlError::UnexpectedHost(attachment_url.to_string()))?;

        // An absolute or scheme-relative remainder makes `join` resolve onto
        // that remainder's own origin instead of appending to the base.
        let joined = self.base.join(suffix)?;
        if joined.origin() != self.base.origin() {
            return Err(ProxiedUrlError::UnexpectedHost(attachment_url.to_string()));
        }

        Ok(joined)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProxiedUrlError {
    #[error("attachment url is not on the platform cdn: {0}")]
    UnexpectedHost(String),
    #[error("joining onto proxy base: {0}")]
    Join(#[from] url::ParseError),
}
