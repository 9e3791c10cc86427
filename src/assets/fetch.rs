use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::foundation::error::{StudioError, StudioResult};

/// Loads encoded image bytes for a source reference (URL or path).
pub trait ImageFetcher: Send + Sync {
    /// Fetch the encoded bytes behind `source`.
    fn fetch(&self, source: &str) -> impl Future<Output = StudioResult<Vec<u8>>> + Send;
}

/// Fetcher for `http(s)://` URLs, `file://` URLs and plain filesystem paths.
#[derive(Clone, Debug)]
pub struct ImageLoader {
    client: reqwest::Client,
}

impl ImageLoader {
    /// Build a loader. `timeout` bounds each HTTP request; `None` leaves the network stack's
    /// defaults in place.
    pub fn new(timeout: Option<Duration>) -> StudioResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("stillmotion/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| StudioError::unsupported(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> StudioResult<Vec<u8>> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                StudioError::upstream(format!("image service unreachable: {e}"))
            } else {
                StudioError::image_load(format!("image request failed: {e}"))
            }
        })?;

        let status = resp.status();
        if status.is_server_error() {
            return Err(StudioError::upstream(format!(
                "image service answered {status}"
            )));
        }
        if !status.is_success() {
            return Err(StudioError::image_load(format!(
                "image request answered {status}"
            )));
        }

        let bytes = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                StudioError::upstream(format!("image download timed out: {e}"))
            } else {
                StudioError::image_load(format!("image download failed: {e}"))
            }
        })?;
        Ok(bytes.to_vec())
    }
}

impl ImageFetcher for ImageLoader {
    async fn fetch(&self, source: &str) -> StudioResult<Vec<u8>> {
        if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!(url = source, "fetching image");
            return self.fetch_http(source).await;
        }

        let path = PathBuf::from(source.strip_prefix("file://").unwrap_or(source));
        tokio::fs::read(&path).await.map_err(|e| {
            StudioError::image_load(format!("failed to read image '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
