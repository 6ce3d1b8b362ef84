//! Replay records for the persistence layer
//!
//! A record is the starting state, every committed history entry and the
//! final state. Replaying re-applies the recorded *effects* to the starting
//! state; the processor is never re-run, so a record stays valid even after
//! validation rules change.

use crate::game::logger::GameLogger;
use crate::game::state_hash::{compute_state_hash, format_hash};
use crate::game::GameState;
use crate::undo::HistoryEntry;
use crate::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable record of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// State the first entry was applied to
    pub initial_state: GameState,

    /// Committed transactions, oldest first
    pub entries: Vec<HistoryEntry>,

    /// State when the record was taken
    pub final_state: GameState,
}

impl ReplayRecord {
    pub fn new(initial_state: GameState, entries: Vec<HistoryEntry>, final_state: GameState) -> Self {
        ReplayRecord {
            initial_state,
            entries,
            final_state,
        }
    }

    /// Save this record to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a record from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn action_count(&self) -> usize {
        self.entries.len()
    }

    pub fn effect_count(&self) -> usize {
        self.entries.iter().map(|e| e.effects.len()).sum()
    }

    /// State after the first `steps` entries
    pub fn replay_to(&self, steps: usize, logger: &GameLogger) -> GameState {
        let mut state = self.initial_state.clone();
        for entry in self.entries.iter().take(steps) {
            state.apply_all(entry.effects.iter(), logger);
        }
        state
    }

    /// State after every entry
    pub fn replay(&self, logger: &GameLogger) -> GameState {
        self.replay_to(self.entries.len(), logger)
    }

    /// Replay and check the result matches `final_state` (display log excluded)
    pub fn verify(&self, logger: &GameLogger) -> Result<GameState> {
        let replayed = self.replay(logger);
        let expected = compute_state_hash(&self.final_state);
        let actual = compute_state_hash(&replayed);
        if expected != actual {
            return Err(TableError::ReplayDiverged(format!(
                "expected state {} after {} actions, got {}",
                format_hash(expected),
                self.entries.len(),
                format_hash(actual)
            )));
        }
        Ok(replayed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::game::actions::Action;
    use crate::game::effects::Effect;
    use smallvec::smallvec;

    fn life_record(deltas: &[i32]) -> (ReplayRecord, PlayerId) {
        let initial = GameState::new_two_player("Alice", "Bob", 40);
        let player = initial.players[0].id;
        let mut final_state = initial.clone();
        let mut entries = Vec::new();
        for &delta in deltas {
            final_state.players[0].life += delta;
            entries.push(HistoryEntry {
                action: Action::ModifyLife { player, delta },
                effects: smallvec![Effect::ModifyLife { player, delta }],
                timestamp_ms: 1,
            });
        }
        (ReplayRecord::new(initial, entries, final_state), player)
    }

    #[test]
    fn test_replay_applies_effects() {
        let (record, player) = life_record(&[-3, -4, 2]);
        let logger = GameLogger::capturing();

        assert_eq!(record.replay_to(1, &logger).get_player(player).unwrap().life, 37);
        let replayed = record.verify(&logger).unwrap();
        assert_eq!(replayed.get_player(player).unwrap().life, 35);
        assert_eq!(record.action_count(), 3);
        assert_eq!(record.effect_count(), 3);
    }

    #[test]
    fn test_tampered_record_diverges() {
        let (mut record, _) = life_record(&[-3]);
        record.final_state.players[0].life = 99;

        let err = record.verify(&GameLogger::capturing()).unwrap_err();
        assert!(matches!(err, TableError::ReplayDiverged(_)));
    }

    #[test]
    fn test_record_json_round_trip() {
        let (record, _) = life_record(&[5]);
        let json = serde_json::to_string(&record).unwrap();
        let restored: ReplayRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
