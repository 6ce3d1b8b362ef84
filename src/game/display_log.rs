//! Rolling table log shown to players
//!
//! This is cosmetic state: newest entry first, capped, and never rolled back
//! by undo. The authoritative record of what happened is the history log.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of entries kept
pub const DEFAULT_DISPLAY_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLogEntry {
    pub label: String,
    pub detail: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLog {
    entries: VecDeque<DisplayLogEntry>,
    capacity: usize,
}

impl DisplayLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DISPLAY_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        DisplayLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an entry, dropping the oldest ones past capacity
    pub fn push(&mut self, entry: DisplayLogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &DisplayLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&DisplayLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for DisplayLog {
    fn default() -> Self {
        Self::new()
    }
}
