//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`StatusBoardError`] via `#[from]` at port boundaries. [`RecordError`]
//! never crosses a port: it degrades a single card and ends up in the
//! tick report.

/// Top-level error shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum StatusBoardError {
    /// Something was looked up that does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The status source could not deliver a payload (network, IO, parse).
    #[error("status source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StatusBoardError {
    /// Wrap any error produced by a status source adapter.
    pub fn upstream<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }
}

/// Why a server record could not be turned into card values.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The record carries no usable `name`, so there is no card to bind to.
    #[error("record has no name")]
    MissingName,

    /// The record does not match the expected shape.
    #[error("malformed record")]
    Malformed(#[from] serde_json::Error),

    /// A ratio was requested against a zero total.
    #[error("{field} total is zero")]
    ZeroTotal {
        /// Metric the ratio was computed for.
        field: &'static str,
    },

    /// A metric does not hold a finite number.
    #[error("{field} is not a finite number")]
    NonFinite {
        /// Offending metric.
        field: &'static str,
    },
}

/// A lookup that found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing looked up (e.g. `"Server"`).
    pub entity: &'static str,
    /// Identifier used for the lookup.
    pub id: String,
}
