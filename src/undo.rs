//! History log for undo and replay
//!
//! One entry per committed action: the intent, the effects it produced and
//! when. Entries are appended by `dispatch` and popped (LIFO) by `undo`;
//! nothing else edits the log. Undo itself records nothing, so there is no
//! redo.

use crate::game::actions::Action;
use crate::game::effects::EffectList;
use serde::{Deserialize, Serialize};

/// A committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The intent as received (kept for auditing; replays use `effects`)
    pub action: Action,

    /// Effects in the order they were applied
    pub effects: EffectList,

    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

/// Append-only (until undone) sequence of transactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    /// Stack of entries (most recent at end)
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        History {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Get the most recent entry without removing it
    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Pop and return the most recent entry
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of effects across all entries
    pub fn effect_count(&self) -> usize {
        self.entries.iter().map(|e| e.effects.len()).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries
    }
}
