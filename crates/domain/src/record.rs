//! Server records: the read-only input polled from the collector's `stats.json`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::format::js_round;

/// Host serving the flag icons, keyed by lowercased location code.
pub const FLAG_HOST: &str = "https://z-fs.cols.ro/flags";

/// Stable identity of a server across polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerKey(String);

impl ServerKey {
    /// Wrap a server name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the inner name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the key out of a raw record without deserializing the rest.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingName`] when `name` is absent, not a
    /// string, or empty.
    pub fn of(value: &serde_json::Value) -> Result<Self, RecordError> {
        value
            .get("name")
            .and_then(serde_json::Value::as_str)
            .filter(|name| !name.is_empty())
            .map(Self::new)
            .ok_or(RecordError::MissingName)
    }
}

impl fmt::Display for ServerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aspect variant of a flag icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagShape {
    /// Used on cards.
    Square,
    /// Used in the detail view.
    RoundedRectangle,
}

impl FlagShape {
    fn path(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::RoundedRectangle => "rounded-rectangle",
        }
    }
}

/// One server as reported by the collector.
///
/// Every field defaults so partially filled records still deserialize;
/// fields of the wrong type fail the whole record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerRecord {
    pub name: String,
    pub alias: String,
    #[serde(rename = "type")]
    pub host_type: String,
    pub location: String,
    pub online4: bool,
    pub online6: bool,
    /// Localized uptime, e.g. `"3 天"` or `"05:12:09"`.
    pub uptime: String,
    /// CPU usage, 0–100.
    pub cpu: f64,
    /// KiB.
    pub memory_used: f64,
    /// KiB.
    pub memory_total: f64,
    /// KiB.
    pub swap_used: f64,
    /// KiB.
    pub swap_total: f64,
    /// MiB.
    pub hdd_used: f64,
    /// MiB.
    pub hdd_total: f64,
    /// Instantaneous upload rate, bytes.
    pub network_tx: f64,
    /// Instantaneous download rate, bytes.
    pub network_rx: f64,
    /// Cumulative upload, bytes.
    pub network_out: f64,
    /// Cumulative download, bytes.
    pub network_in: f64,
}

impl ServerRecord {
    /// Deserialize a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Malformed`] when a field has the wrong type.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, RecordError> {
        Ok(Self::deserialize(value)?)
    }

    /// Online if reachable over either address family.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online4 || self.online6
    }

    /// Icon URL for this record's location.
    #[must_use]
    pub fn flag_url(&self, shape: FlagShape) -> String {
        flag_url(&self.location, shape)
    }

    /// Rounded CPU usage.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NonFinite`] if `cpu` is not a finite number.
    pub fn cpu_percent(&self) -> Result<i64, RecordError> {
        if !self.cpu.is_finite() {
            return Err(RecordError::NonFinite { field: "cpu" });
        }
        Ok(js_round(self.cpu))
    }

    /// Rounded memory usage in percent.
    ///
    /// # Errors
    ///
    /// See [`percent`].
    pub fn memory_percent(&self) -> Result<i64, RecordError> {
        percent(self.memory_used, self.memory_total, "memory")
    }

    /// Rounded disk usage in percent.
    ///
    /// # Errors
    ///
    /// See [`percent`].
    pub fn hdd_percent(&self) -> Result<i64, RecordError> {
        percent(self.hdd_used, self.hdd_total, "hdd")
    }

    /// Rounded swap usage in percent.
    ///
    /// # Errors
    ///
    /// See [`percent`].
    pub fn swap_percent(&self) -> Result<i64, RecordError> {
        percent(self.swap_used, self.swap_total, "swap")
    }
}

/// The part of a record an offline render reads.
///
/// Read straight from the raw value, so a metric of the wrong type on an
/// unreachable server does not make the record unreadable. Missing or
/// mistyped fields read as empty, flags as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordIdentity {
    pub location: String,
    pub host_type: String,
    pub online: bool,
}

impl RecordIdentity {
    #[must_use]
    pub fn of(value: &serde_json::Value) -> Self {
        let text = |field: &str| {
            value
                .get(field)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let flag = |field: &str| {
            value
                .get(field)
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false)
        };
        Self {
            location: text("location"),
            host_type: text("type"),
            online: flag("online4") || flag("online6"),
        }
    }

    #[must_use]
    pub fn flag_url(&self, shape: FlagShape) -> String {
        flag_url(&self.location, shape)
    }
}

fn flag_url(location: &str, shape: FlagShape) -> String {
    format!(
        "{FLAG_HOST}/{}/{}.svg",
        shape.path(),
        location.to_lowercase()
    )
}

/// `round(used / total * 100)`.
///
/// # Errors
///
/// Returns [`RecordError::ZeroTotal`] when `total` is not positive and
/// [`RecordError::NonFinite`] when either side is not finite.
pub fn percent(used: f64, total: f64, field: &'static str) -> Result<i64, RecordError> {
    if !used.is_finite() || !total.is_finite() {
        return Err(RecordError::NonFinite { field });
    }
    if total <= 0.0 {
        return Err(RecordError::ZeroTotal { field });
    }
    Ok(js_round(used / total * 100.0))
}

/// The document served at `stats.json`.
///
/// Records stay raw so one malformed entry only affects its own card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsPayload {
    /// Unix seconds of the collector's last refresh.
    #[serde(default)]
    pub updated: Option<u64>,
    pub servers: Vec<serde_json::Value>,
}

impl StatsPayload {
    /// Parse a `stats.json` body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the body is not an object with a
    /// `servers` array.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "name": "hk-1",
            "alias": "Hong Kong",
            "type": "KVM",
            "location": "HK",
            "online4": true,
            "online6": false,
            "uptime": "3 天",
            "load_1": 0.12,
            "cpu": 12.6,
            "memory_used": 512,
            "memory_total": 2048,
            "swap_used": 0,
            "swap_total": 1024,
            "hdd_used": 1024,
            "hdd_total": 4096,
            "network_tx": 2048,
            "network_rx": 100,
            "network_out": 1_073_741_824_u64,
            "network_in": 5_242_880
        })
    }

    #[test]
    fn should_deserialize_collector_record_and_ignore_unknown_fields() {
        let record = ServerRecord::from_value(&sample()).unwrap();
        assert_eq!(record.name, "hk-1");
        assert_eq!(record.host_type, "KVM");
        assert!(record.is_online());
        assert!((record.cpu - 12.6).abs() < f64::EPSILON);
    }

    #[test]
    fn should_default_missing_fields() {
        let record = ServerRecord::from_value(&json!({"name": "bare"})).unwrap();
        assert_eq!(record.alias, "");
        assert!(!record.is_online());
    }

    #[test]
    fn should_reject_field_of_wrong_type() {
        let result = ServerRecord::from_value(&json!({"name": "x", "cpu": "hot"}));
        assert!(matches!(result, Err(RecordError::Malformed(_))));
    }

    #[test]
    fn should_read_key_without_full_deserialization() {
        let key = ServerKey::of(&json!({"name": "x", "cpu": "hot"})).unwrap();
        assert_eq!(key.as_str(), "x");
    }

    #[test]
    fn should_report_missing_name() {
        assert!(matches!(
            ServerKey::of(&json!({"alias": "anon"})),
            Err(RecordError::MissingName)
        ));
        assert!(matches!(
            ServerKey::of(&json!({"name": ""})),
            Err(RecordError::MissingName)
        ));
    }

    #[test]
    fn should_build_lowercase_flag_urls() {
        let record = ServerRecord::from_value(&sample()).unwrap();
        assert_eq!(
            record.flag_url(FlagShape::Square),
            "https://z-fs.cols.ro/flags/square/hk.svg"
        );
        assert_eq!(
            record.flag_url(FlagShape::RoundedRectangle),
            "https://z-fs.cols.ro/flags/rounded-rectangle/hk.svg"
        );
    }

    #[test]
    fn should_compute_rounded_percentages() {
        let record = ServerRecord::from_value(&sample()).unwrap();
        assert_eq!(record.cpu_percent().unwrap(), 13);
        assert_eq!(record.memory_percent().unwrap(), 25);
        assert_eq!(record.hdd_percent().unwrap(), 25);
    }

    #[test]
    fn should_reject_ratio_against_zero_total() {
        let record = ServerRecord {
            name: "x".to_string(),
            memory_used: 10.0,
            ..ServerRecord::default()
        };
        assert!(matches!(
            record.memory_percent(),
            Err(RecordError::ZeroTotal { field: "memory" })
        ));
    }

    #[test]
    fn should_reject_non_finite_cpu() {
        let record = ServerRecord {
            cpu: f64::NAN,
            ..ServerRecord::default()
        };
        assert!(matches!(
            record.cpu_percent(),
            Err(RecordError::NonFinite { field: "cpu" })
        ));
    }

    #[test]
    fn should_read_identity_when_metrics_are_mistyped() {
        let identity = RecordIdentity::of(&json!({
            "name": "x",
            "location": "DE",
            "type": "KVM",
            "online4": false,
            "online6": true,
            "cpu": "n/a"
        }));
        assert_eq!(identity.location, "DE");
        assert_eq!(identity.host_type, "KVM");
        assert!(identity.online);
        assert_eq!(
            identity.flag_url(FlagShape::Square),
            "https://z-fs.cols.ro/flags/square/de.svg"
        );
    }

    #[test]
    fn should_read_mistyped_identity_fields_as_empty() {
        let identity = RecordIdentity::of(&json!({"location": 49, "online4": "yes"}));
        assert_eq!(identity, RecordIdentity::default());
    }

    #[test]
    fn should_parse_payload_and_keep_records_raw() {
        let body = br#"{"updated": 1700000000, "servers": [{"name": "a"}, {"cpu": "bad"}]}"#;
        let payload = StatsPayload::from_slice(body).unwrap();
        assert_eq!(payload.updated, Some(1_700_000_000));
        assert_eq!(payload.servers.len(), 2);
    }

    #[test]
    fn should_reject_payload_without_servers() {
        assert!(StatsPayload::from_slice(br#"{"updated": 1}"#).is_err());
        assert!(StatsPayload::from_slice(b"not json").is_err());
    }
}
