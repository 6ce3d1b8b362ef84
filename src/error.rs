//! Error types for the card table engine

use crate::core::{CardId, PlayerId};
use crate::zones::Zone;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("Card {card} is in {actual:?}, expected {expected:?}")]
    InvalidZone {
        card: CardId,
        expected: Zone,
        actual: Zone,
    },

    #[error("Player {player} does not own card {card}")]
    NotOwner { card: CardId, player: PlayerId },

    #[error("Card {0} is already tapped")]
    AlreadyTapped(CardId),

    #[error("Card {0} is already untapped")]
    AlreadyUntapped(CardId),

    #[error("Life change {delta:+} for player {player} would leave {life} out of range")]
    LifeOutOfRange { player: PlayerId, life: i32, delta: i32 },

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Unknown action type: {0}")]
    UnknownActionType(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Replay diverged: {0}")]
    ReplayDiverged(String),
}

impl TableError {
    /// True for errors that mean "this action is illegal right now", as opposed
    /// to I/O or data failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TableError::CardNotFound(_)
                | TableError::InvalidZone { .. }
                | TableError::NotOwner { .. }
                | TableError::AlreadyTapped(_)
                | TableError::AlreadyUntapped(_)
                | TableError::PlayerNotFound(_)
                | TableError::LifeOutOfRange { .. }
                | TableError::UnknownActionType(_)
        )
    }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
