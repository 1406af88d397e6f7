//! Board: the ordered set of cards and the per-poll render pass.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardState};
use crate::error::RecordError;
use crate::record::{ServerKey, StatsPayload};
use crate::time::{Timestamp, from_unix_secs};

/// All cards in the order their servers first appeared.
///
/// Cards are bound by [`ServerKey`], not by position, so a reordered or
/// resized server list patches the right cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Board {
    cards: Vec<Card>,
    #[serde(skip)]
    index: HashMap<ServerKey, usize>,
    updated_at: Option<Timestamp>,
}

/// A record that could not be rendered during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    /// `None` when the record had no usable name.
    pub key: Option<ServerKey>,
    pub reason: String,
}

/// Outcome of one [`Board::apply`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Cards created during this pass.
    pub created: usize,
    pub online: usize,
    pub offline: usize,
    pub degraded: usize,
    /// Records ignored: no name, or a name already seen in this payload.
    pub skipped: usize,
    pub failures: Vec<RecordFailure>,
}

/// What subscribers receive after every successful pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardUpdate {
    pub cards: Vec<Card>,
    pub report: TickReport,
    pub updated_at: Option<Timestamp>,
}

impl TickReport {
    fn fail(&mut self, key: Option<ServerKey>, reason: String) {
        self.failures.push(RecordFailure { key, reason });
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in slot order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up the card bound to `key`.
    #[must_use]
    pub fn get(&self, key: &ServerKey) -> Option<&Card> {
        self.index.get(key).and_then(|&slot| self.cards.get(slot))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Collector timestamp of the last applied payload, if it carried one.
    #[must_use]
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    /// Run one render pass over `payload`.
    ///
    /// - a server seen for the first time gets a new card appended;
    /// - a known server has its card patched in place;
    /// - a record that fails to render degrades its own card only;
    /// - cards whose server is missing from the payload are left as they are.
    pub fn apply(&mut self, payload: &StatsPayload) -> TickReport {
        let mut report = TickReport::default();
        let mut seen = HashSet::with_capacity(payload.servers.len());

        for value in &payload.servers {
            let key = match ServerKey::of(value) {
                Ok(key) => key,
                Err(err) => {
                    report.skipped += 1;
                    report.fail(None, err.to_string());
                    continue;
                }
            };
            if !seen.insert(key.clone()) {
                report.skipped += 1;
                report.fail(Some(key), "duplicate server name".to_string());
                continue;
            }

            let slot = self.slot_for(&key, value, &mut report);
            let Some(card) = self.cards.get_mut(slot) else {
                continue;
            };
            match card.patch(value) {
                Ok(()) if card.state == CardState::Online => report.online += 1,
                Ok(()) => report.offline += 1,
                Err(err) => {
                    report.degraded += 1;
                    report.fail(Some(key), describe(&err));
                }
            }
        }

        if let Some(updated_at) = payload.updated.and_then(from_unix_secs) {
            self.updated_at = Some(updated_at);
        }
        report
    }

    fn slot_for(
        &mut self,
        key: &ServerKey,
        value: &serde_json::Value,
        report: &mut TickReport,
    ) -> usize {
        if let Some(&slot) = self.index.get(key) {
            return slot;
        }
        let slot = self.cards.len();
        let alias = value
            .get("alias")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        self.cards.push(Card::create(slot, key.clone(), alias));
        self.index.insert(key.clone(), slot);
        report.created += 1;
        slot
    }
}

fn describe(err: &RecordError) -> String {
    match err {
        RecordError::Malformed(inner) => format!("{err}: {inner}"),
        other => other.to_string(),
    }
}
