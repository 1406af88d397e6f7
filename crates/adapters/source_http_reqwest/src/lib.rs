//! # statusboard-adapter-source-http-reqwest
//!
//! Status source that polls a collector's `stats.json` over HTTP.
//!
//! ## Responsibilities
//! - Issue `GET {base_url}/stats.json` with a bounded timeout
//! - Treat non-2xx answers as failures
//! - Parse the body into a [`StatsPayload`](statusboard_domain::record::StatsPayload)
//!
//! ## Dependency rule
//! Same as other adapters: depends on `statusboard-app` and
//! `statusboard-domain`.

pub mod config;
pub mod error;
pub mod source;

pub use config::HttpSourceConfig;
pub use error::HttpSourceError;
pub use source::HttpStatusSource;
