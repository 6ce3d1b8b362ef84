//! Player representation

use crate::core::{CardId, GameEntity, PlayerId, PlayerName};
use serde::{Deserialize, Serialize};

/// Lobby readiness. Has no effect on action resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Ready,
    #[default]
    Waiting,
    Testing,
}

/// Represents a player at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name (display only)
    pub name: PlayerName,

    /// Life total. No floor is enforced here.
    pub life: i32,

    #[serde(default)]
    pub status: PlayerStatus,

    /// Designated commander, for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commander: Option<CardId>,

    /// Seat color, for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, starting_life: i32) -> Self {
        Player {
            id,
            name: name.into(),
            life: starting_life,
            status: PlayerStatus::default(),
            commander: None,
            color: None,
        }
    }

    /// Add a signed amount to the life total (positive = gain)
    pub fn adjust_life(&mut self, delta: i32) {
        self.life = self.life.saturating_add(delta);
    }
}

impl GameEntity<Player> for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
