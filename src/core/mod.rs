//! Core table types and entities

pub mod card;
pub mod entity;
pub mod player;
pub mod types;

pub use card::{Card, CardMetadata};
pub use entity::{EntityId, EntityStore, GameEntity};
pub use player::{Player, PlayerStatus};
pub use types::{CardName, PlayerName};

pub type CardId = EntityId<Card>;
pub type PlayerId = EntityId<Player>;
