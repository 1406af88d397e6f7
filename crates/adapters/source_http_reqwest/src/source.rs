//! [`StatusSource`] backed by an HTTP `GET` of `stats.json`.

use std::time::Duration;

use statusboard_app::ports::StatusSource;
use statusboard_domain::error::StatusBoardError;
use statusboard_domain::record::StatsPayload;

use crate::config::HttpSourceConfig;
use crate::error::HttpSourceError;

/// Path of the document below the collector root.
const STATS_PATH: &str = "stats.json";

/// Fetches `{base_url}/stats.json` on every call.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    client: reqwest::Client,
    url: String,
}

impl HttpStatusSource {
    /// Build a source for the collector rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpSourceError::Client`] when the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpSourceError::Client)?;
        Ok(Self {
            client,
            url: format!("{}/{STATS_PATH}", base_url.trim_end_matches('/')),
        })
    }

    /// Build a source from its configuration section.
    ///
    /// # Errors
    ///
    /// See [`HttpStatusSource::new`].
    pub fn from_config(config: &HttpSourceConfig) -> Result<Self, HttpSourceError> {
        Self::new(&config.base_url, config.timeout())
    }

    /// The full URL being polled.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get(&self) -> Result<StatsPayload, HttpSourceError> {
        let request_error = |source| HttpSourceError::Request {
            url: self.url.clone(),
            source,
        };
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_error)?
            .bytes()
            .await
            .map_err(request_error)?;

        StatsPayload::from_slice(&body).map_err(|source| HttpSourceError::Payload {
            url: self.url.clone(),
            source,
        })
    }
}

impl StatusSource for HttpStatusSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<StatsPayload, StatusBoardError> {
        let payload = self.get().await?;
        tracing::trace!(servers = payload.servers.len(), "stats fetched");
        Ok(payload)
    }
}
