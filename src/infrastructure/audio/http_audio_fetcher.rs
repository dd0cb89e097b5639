use async_trait::async_trait;
use url::Url;

use crate::application::ports::{AudioFetchError, AudioFetcher};
use crate::infrastructure::observability::sanitize_url;

pub struct HttpAudioFetcher {
    client: reqwest::Client,
}

impl HttpAudioFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpAudioFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, AudioFetchError> {
        tracing::debug!(url = %sanitize_url(url.as_str()), "Downloading audio");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AudioFetchError::RequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(AudioFetchError::UnexpectedStatus(
                response.status().as_u16(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioFetchError::RequestFailed(format!("body: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
