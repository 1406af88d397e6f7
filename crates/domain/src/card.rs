//! Card: the addressable view-model bound to one server.
//!
//! A card is built once, the first time its server shows up, and is then
//! patched in place on every poll. It is never removed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detail::ServerDetail;
use crate::error::RecordError;
use crate::format::{
    COLOR_GREY, COLOR_RED, normalize_uptime, progress_color, status_color, status_label, up_down,
};
use crate::record::{FlagShape, RecordIdentity, ServerKey, ServerRecord};

const OFFLINE: &str = "Offline";
const PLACEHOLDER: &str = "-";

/// Element identifier of a card, derived from the slot it was created in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// `table-item-{slot}`.
    #[must_use]
    pub fn for_slot(slot: usize) -> Self {
        Self(format!("table-item-{slot}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the CPU / memory / disk bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBar {
    /// CSS width, e.g. `"42%"`.
    pub width: String,
    /// CSS background colour; empty means default style.
    pub color: String,
    pub label: String,
}

impl ProgressBar {
    fn for_percent(percent: i64) -> Self {
        Self {
            width: format!("{percent}%"),
            color: progress_color(percent).to_string(),
            label: format!("{percent}%"),
        }
    }

    fn offline() -> Self {
        Self {
            width: "100%".to_string(),
            color: COLOR_RED.to_string(),
            label: OFFLINE.to_string(),
        }
    }
}

/// What the last render pass made of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    /// Rendered from a live record.
    Online,
    /// The server reported itself unreachable.
    Offline,
    /// The record could not be rendered; offline styling, identity kept.
    Degraded,
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
            Self::Degraded => f.write_str("degraded"),
        }
    }
}

/// View-model of one server card.
///
/// Fields are public for presenters; mutate through [`Card::patch`] so the
/// online / offline / degraded styling stays consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub slot: usize,
    pub key: ServerKey,
    /// Display name, set when the card is created.
    pub alias: String,
    pub flag_src: String,
    pub location: String,
    pub host_type: String,
    pub uptime: String,
    pub network: String,
    pub traffic: String,
    pub cpu: ProgressBar,
    pub memory: ProgressBar,
    pub hdd: ProgressBar,
    pub status_dot: String,
    pub status_label: String,
    pub border_color: String,
    pub state: CardState,
    /// Content of the detail view; `None` when the card is not clickable.
    pub detail: Option<ServerDetail>,
}

/// Everything an online render writes, computed before anything is committed.
struct OnlinePatch {
    flag_src: String,
    location: String,
    host_type: String,
    uptime: String,
    network: String,
    traffic: String,
    cpu: ProgressBar,
    memory: ProgressBar,
    hdd: ProgressBar,
    status: &'static str,
    status_label: &'static str,
    detail: ServerDetail,
}

impl OnlinePatch {
    fn from_record(record: &ServerRecord) -> Result<Self, RecordError> {
        let cpu = record.cpu_percent()?;
        let memory = record.memory_percent()?;
        let hdd = record.hdd_percent()?;
        let detail = ServerDetail::from_record(record)?;

        Ok(Self {
            flag_src: record.flag_url(FlagShape::Square),
            location: record.location.clone(),
            host_type: record.host_type.clone(),
            uptime: normalize_uptime(&record.uptime),
            network: up_down(record.network_tx, record.network_rx),
            traffic: up_down(record.network_out, record.network_in),
            cpu: ProgressBar::for_percent(cpu),
            memory: ProgressBar::for_percent(memory),
            hdd: ProgressBar::for_percent(hdd),
            status: status_color(cpu),
            status_label: status_label(cpu),
            detail,
        })
    }
}

impl Card {
    /// Build the full card structure in `slot`, styled as degraded until
    /// the first [`patch`](Self::patch).
    #[must_use]
    pub fn create(slot: usize, key: ServerKey, alias: impl Into<String>) -> Self {
        Self {
            id: CardId::for_slot(slot),
            slot,
            key,
            alias: alias.into(),
            flag_src: String::new(),
            location: String::new(),
            host_type: String::new(),
            uptime: OFFLINE.to_string(),
            network: PLACEHOLDER.to_string(),
            traffic: PLACEHOLDER.to_string(),
            cpu: ProgressBar::offline(),
            memory: ProgressBar::offline(),
            hdd: ProgressBar::offline(),
            status_dot: COLOR_GREY.to_string(),
            status_label: OFFLINE.to_string(),
            border_color: COLOR_RED.to_string(),
            state: CardState::Degraded,
            detail: None,
        }
    }

    /// Whether the detail view can be opened.
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.detail.is_some()
    }

    /// Render a raw record into this card.
    ///
    /// Liveness is read first. An offline record only contributes its
    /// identity fields and cannot fail. An online record is deserialized in
    /// full; on failure the card is [degraded](Self::degrade) and the error
    /// is returned, with nothing from the failed record written.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] when an online record is malformed or its
    /// usage ratios cannot be computed.
    pub fn patch(&mut self, value: &serde_json::Value) -> Result<(), RecordError> {
        let identity = RecordIdentity::of(value);
        if !identity.online {
            self.apply_offline(&identity);
            return Ok(());
        }
        let result = ServerRecord::from_value(value)
            .and_then(|record| OnlinePatch::from_record(&record))
            .map(|patch| self.apply_online(patch));
        if result.is_err() {
            self.degrade();
        }
        result
    }

    fn apply_online(&mut self, patch: OnlinePatch) {
        self.flag_src = patch.flag_src;
        self.location = patch.location;
        self.host_type = patch.host_type;
        self.uptime = patch.uptime;
        self.network = patch.network;
        self.traffic = patch.traffic;
        self.cpu = patch.cpu;
        self.memory = patch.memory;
        self.hdd = patch.hdd;
        self.status_dot = patch.status.to_string();
        self.border_color = patch.status.to_string();
        self.status_label = patch.status_label.to_string();
        self.state = CardState::Online;
        self.detail = Some(patch.detail);
    }

    /// Render a server that reported itself unreachable.
    pub fn apply_offline(&mut self, identity: &RecordIdentity) {
        self.flag_src = identity.flag_url(FlagShape::Square);
        self.location.clone_from(&identity.location);
        self.host_type.clone_from(&identity.host_type);
        self.force_offline_style();
        self.state = CardState::Offline;
    }

    /// Offline styling after a render failure. Identity fields (alias, flag,
    /// location, type) keep their last rendered values.
    pub fn degrade(&mut self) {
        self.force_offline_style();
        self.state = CardState::Degraded;
    }

    fn force_offline_style(&mut self) {
        self.detail = None;
        self.border_color = COLOR_RED.to_string();
        self.uptime = OFFLINE.to_string();
        self.network = PLACEHOLDER.to_string();
        self.traffic = PLACEHOLDER.to_string();
        self.cpu = ProgressBar::offline();
        self.memory = ProgressBar::offline();
        self.hdd = ProgressBar::offline();
        self.status_dot = COLOR_GREY.to_string();
        self.status_label = OFFLINE.to_string();
    }
}
