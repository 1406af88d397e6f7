//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp of the collector's last refresh.
pub type Timestamp = DateTime<Utc>;

/// Convert the collector's `updated` field (unix seconds) into a [`Timestamp`].
///
/// Returns `None` when the value does not fit a valid date.
#[must_use]
pub fn from_unix_secs(secs: u64) -> Option<Timestamp> {
    let secs = i64::try_from(secs).ok()?;
    DateTime::from_timestamp(secs, 0)
}
