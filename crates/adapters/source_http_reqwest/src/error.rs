//! HTTP source error types.

use statusboard_domain::error::StatusBoardError;

/// Errors specific to the HTTP status source.
#[derive(Debug, thiserror::Error)]
pub enum HttpSourceError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed, timed out, or got a non-2xx answer.
    #[error("request to {url} failed")]
    Request {
        /// URL that was requested.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body is not a valid `stats.json` document.
    #[error("invalid stats payload from {url}")]
    Payload {
        /// URL that was requested.
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<HttpSourceError> for StatusBoardError {
    fn from(err: HttpSourceError) -> Self {
        Self::upstream(err)
    }
}
