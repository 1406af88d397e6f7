//! Status source port: where the `stats.json` payload comes from.

use std::future::Future;

use statusboard_domain::error::StatusBoardError;
use statusboard_domain::record::StatsPayload;

/// Delivers the collector's current [`StatsPayload`].
///
/// Every call is a fresh read; implementations keep no record state.
pub trait StatusSource {
    /// Fetch and parse the status document.
    fn fetch(&self) -> impl Future<Output = Result<StatsPayload, StatusBoardError>> + Send;
}

impl<T: StatusSource + Send + Sync> StatusSource for std::sync::Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<StatsPayload, StatusBoardError>> + Send {
        (**self).fetch()
    }
}
