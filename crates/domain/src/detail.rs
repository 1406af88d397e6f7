//! Detail view: the modal content shown when a card is opened.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::format::{byte_convert_kib, normalize_uptime, up_down};
use crate::record::{FlagShape, ServerRecord};

/// Snapshot of one server, captured at the last successful render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDetail {
    pub flag_src: String,
    pub name: String,
    pub host_type: String,
    pub uptime: String,
    pub cpu: String,
    pub memory: String,
    pub swap: String,
    pub hdd: String,
    pub network: String,
    pub traffic: String,
}

impl ServerDetail {
    /// Build the detail view for `record`.
    ///
    /// Memory and swap are reported in KiB. Disk fields are MiB, so they are
    /// scaled by 1024 before going through [`byte_convert_kib`]. Swap is
    /// shown as `-` when its ratio cannot be computed.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] when the memory or disk ratio cannot be
    /// computed.
    pub fn from_record(record: &ServerRecord) -> Result<Self, RecordError> {
        let memory = usage(
            record.memory_percent()?,
            record.memory_used,
            record.memory_total,
        );
        let swap = if record.swap_used == 0.0 {
            "None".to_string()
        } else {
            record.swap_percent().map_or_else(
                |_| "-".to_string(),
                |percent| usage(percent, record.swap_used, record.swap_total),
            )
        };
        let hdd = usage(
            record.hdd_percent()?,
            record.hdd_used * 1024.0,
            record.hdd_total * 1024.0,
        );

        Ok(Self {
            flag_src: record.flag_url(FlagShape::RoundedRectangle),
            name: record.name.clone(),
            host_type: record.host_type.clone(),
            uptime: normalize_uptime(&record.uptime),
            cpu: format!("{}%", record.cpu),
            memory,
            swap,
            hdd,
            network: up_down(record.network_tx, record.network_rx),
            traffic: up_down(record.network_out, record.network_in),
        })
    }
}

fn usage(percent: i64, used: f64, total: f64) -> String {
    format!(
        "{percent}% ({} / {})",
        byte_convert_kib(used),
        byte_convert_kib(total)
    )
}
