//! Session configuration

use crate::game::display_log::DEFAULT_DISPLAY_LOG_CAPACITY;
use crate::game::logger::{OutputFormat, VerbosityLevel};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Life total for multiplayer casual tables
pub const DEFAULT_STARTING_LIFE: i32 = 40;

/// Per-session settings
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Life each player starts with
    pub starting_life: i32,

    /// Entries kept in the rolling display log
    pub display_log_capacity: usize,

    /// Reject unrecognized action types instead of ignoring them with a warning
    pub strict_actions: bool,

    /// Shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    pub verbosity: VerbosityLevel,

    /// Diagnostic log lines as text or JSON objects
    pub output_format: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            starting_life: DEFAULT_STARTING_LIFE,
            display_log_capacity: DEFAULT_DISPLAY_LOG_CAPACITY,
            strict_actions: false,
            seed: None,
            verbosity: VerbosityLevel::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl SessionConfig {
    /// Load a config from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
