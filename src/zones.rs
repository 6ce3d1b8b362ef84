//! Table zones (Library, Hand, Battlefield, etc.)
//!
//! A zone is a label on the card, not a container. Order inside a zone is the
//! storage order of the owner's cards carrying that label, with the end of the
//! sequence being the top (for the library: the next card drawn).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Stack,
    Graveyard,
    Exile,
    /// The command zone, where a commander waits
    #[serde(alias = "commander")]
    Command,
}

impl Zone {
    pub const ALL: [Zone; 7] = [
        Zone::Library,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Stack,
        Zone::Graveyard,
        Zone::Exile,
        Zone::Command,
    ];

    /// Cards entering this zone lose their tapped state
    pub fn clears_tapped(self) -> bool {
        matches!(self, Zone::Hand | Zone::Library)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Stack => "stack",
            Zone::Graveyard => "graveyard",
            Zone::Exile => "exile",
            Zone::Command => "command",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "library" | "deck" => Ok(Zone::Library),
            "hand" => Ok(Zone::Hand),
            "battlefield" => Ok(Zone::Battlefield),
            "stack" => Ok(Zone::Stack),
            "graveyard" => Ok(Zone::Graveyard),
            "exile" => Ok(Zone::Exile),
            "command" | "commander" => Ok(Zone::Command),
            _ => Err(format!("unknown zone '{s}'")),
        }
    }
}
