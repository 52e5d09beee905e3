//! Session history.
//!
//! An append-only, chronologically ordered log of completed phases. The
//! whole sequence is rewritten to the key-value store on every change.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::storage::{load_json_array, remove_key, save_json, KvStore, HISTORY_KEY};
use crate::timer::Phase;

/// One completed phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

impl SessionEntry {
    pub fn new(
        start: DateTime<Local>,
        end: DateTime<Local>,
        phase: Phase,
        activity: Option<String>,
    ) -> Self {
        Self {
            start,
            end,
            phase,
            activity,
        }
    }

    /// Activity label, or `-` when none was set.
    pub fn activity_or_dash(&self) -> &str {
        self.activity.as_deref().unwrap_or("-")
    }

    /// Table cells: start, end, phase, activity.
    pub fn row(&self) -> [String; 4] {
        [
            self.start.format("%H:%M").to_string(),
            self.end.format("%H:%M").to_string(),
            self.phase.label().to_string(),
            self.activity_or_dash().to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionLog {
    entries: Vec<SessionEntry>,
}

impl SessionLog {
    /// Load persisted entries, or start empty.
    ///
    /// Entries that no longer decode are skipped; the damaged document is
    /// kept under a backup key so the next append cannot lose it.
    pub fn load(store: &impl KvStore) -> Self {
        let entries = load_json_array(store, HISTORY_KEY)
            .into_iter()
            .flatten()
            .collect();
        Self { entries }
    }

    /// Append and persist the full sequence.
    pub fn append(&mut self, store: &impl KvStore, entry: SessionEntry) {
        self.entries.push(entry);
        save_json(store, HISTORY_KEY, &self.entries);
    }

    /// Drop every entry and the persisted copy.
    pub fn clear(&mut self, store: &impl KvStore) {
        self.entries.clear();
        remove_key(store, HISTORY_KEY);
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of logged focus phases.
    pub fn focus_count(&self) -> u32 {
        let count = self
            .entries
            .iter()
            .filter(|e| e.phase == Phase::Focus)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
