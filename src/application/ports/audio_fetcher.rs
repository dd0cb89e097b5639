use async_trait::async_trait;
use url::Url;

#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Download the resource at `url` into memory.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, AudioFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioFetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
}
