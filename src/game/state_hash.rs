//! Deterministic state hashing
//!
//! Hashes the board state (players, cards, zone order) while ignoring the
//! cosmetic display log, which undo deliberately does not restore and which
//! carries wall-clock timestamps. Used to check replays and undo round trips.

use crate::game::GameState;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fields excluded from the board hash
const EXCLUDED_FIELDS: &[&str] = &["display_log"];

/// Compute a deterministic hash of the board state
///
/// This serializes the state to JSON, strips excluded fields, then hashes the
/// canonical string. Two states with the same board produce the same hash.
pub fn compute_state_hash(game: &GameState) -> u64 {
    let json_value = match serde_json::to_value(game) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Warning: Failed to serialize game state for hashing: {}", e);
            return 0;
        }
    };

    let cleaned = strip_metadata(json_value);

    let canonical = match serde_json::to_string(&cleaned) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: Failed to canonicalize cleaned state: {}", e);
            return 0;
        }
    };

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}

/// Strip excluded fields from the top-level object
fn strip_metadata(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) => {
            for field in EXCLUDED_FIELDS {
                map.remove(*field);
            }
            serde_json::Value::Object(map)
        }
        other => other,
    }
}

/// Format a hash for display (shows first 8 hex digits)
pub fn format_hash(hash: u64) -> String {
    format!("{:08x}", (hash >> 32) as u32)
}
