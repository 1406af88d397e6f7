//! # statusboard-adapter-source-file
//!
//! Status source that reads `stats.json` from the local filesystem. Useful
//! when the collector runs on the same host and writes the document to disk,
//! and for demos without a collector.
//!
//! The file is read again on every fetch, so rewrites by the collector are
//! picked up on the next tick.

use std::path::{Path, PathBuf};

use statusboard_app::ports::StatusSource;
use statusboard_domain::error::StatusBoardError;
use statusboard_domain::record::StatsPayload;

/// Errors specific to the file status source.
#[derive(Debug, thiserror::Error)]
pub enum FileSourceError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// File that was read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid `stats.json` document.
    #[error("invalid stats payload in {path}")]
    Payload {
        /// File that was read.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<FileSourceError> for StatusBoardError {
    fn from(err: FileSourceError) -> Self {
        Self::upstream(err)
    }
}

/// Reads and parses one `stats.json` file per fetch.
#[derive(Debug, Clone)]
pub struct FileStatusSource {
    path: PathBuf,
}

impl FileStatusSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<StatsPayload, FileSourceError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FileSourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        StatsPayload::from_slice(&body).map_err(|source| FileSourceError::Payload {
            path: self.path.clone(),
            source,
        })
    }
}

impl StatusSource for FileStatusSource {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<StatsPayload, StatusBoardError> {
        Ok(self.read().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn stats_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn should_read_stats_document() {
        let file = stats_file(r#"{"servers": [{"name": "a", "online4": true}]}"#);
        let source = FileStatusSource::new(file.path());

        let payload = source.fetch().await.unwrap();

        assert_eq!(payload.updated, None);
        assert_eq!(payload.servers.len(), 1);
    }

    #[tokio::test]
    async fn should_pick_up_rewritten_file_on_next_fetch() {
        let file = stats_file(r#"{"servers": []}"#);
        let source = FileStatusSource::new(file.path());
        assert!(source.fetch().await.unwrap().servers.is_empty());

        std::fs::write(file.path(), r#"{"servers": [{"name": "a"}, {"name": "b"}]}"#).unwrap();

        assert_eq!(source.fetch().await.unwrap().servers.len(), 2);
    }

    #[tokio::test]
    async fn should_fail_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileStatusSource::new(dir.path().join("stats.json"));

        let result = source.read().await;

        assert!(matches!(result, Err(FileSourceError::Io { .. })));
    }

    #[tokio::test]
    async fn should_fail_when_file_is_not_a_stats_document() {
        let file = stats_file("[1, 2, 3]");
        let source = FileStatusSource::new(file.path());

        let result = source.fetch().await;

        assert!(matches!(result, Err(StatusBoardError::Source(_))));
    }
}
