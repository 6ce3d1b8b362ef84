//! Authoritative table state

use crate::core::{Card, CardId, CardMetadata, EntityId, EntityStore, Player, PlayerId, PlayerName};
use crate::game::display_log::DisplayLog;
use crate::zones::Zone;
use crate::{Result, TableError};
use serde::{Deserialize, Serialize};

/// Complete table state
///
/// This is the tree the session owns exclusively and hands to the broadcast
/// layer after every committed change. Cards and players live in owned
/// collections and refer to each other only by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// All players at the table (Vec for stable seat order, small count)
    pub players: Vec<Player>,

    /// All cards at the table, in storage order (see `crate::zones`)
    pub cards: EntityStore<Card>,

    /// Rolling cosmetic log, newest first
    pub display_log: DisplayLog,

    /// Unified entity ID generator (shared across all entity types)
    next_entity_id: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_display_log(DisplayLog::new())
    }

    pub fn with_display_log(display_log: DisplayLog) -> Self {
        GameState {
            players: Vec::new(),
            cards: EntityStore::new(),
            display_log,
            next_entity_id: 0,
        }
    }

    /// Create a table with two players and no cards
    pub fn new_two_player(player1_name: &str, player2_name: &str, starting_life: i32) -> Self {
        let mut state = Self::new();
        state.add_player(player1_name, starting_life);
        state.add_player(player2_name, starting_life);
        state
    }

    /// Get next entity ID (unified across all entity types)
    pub fn next_id<T>(&mut self) -> EntityId<T> {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    pub fn add_player(&mut self, name: impl Into<PlayerName>, starting_life: i32) -> PlayerId {
        let id = self.next_id();
        self.players.push(Player::new(id, name, starting_life));
        id
    }

    /// Create a card owned by `owner`, placed on top of `zone`
    pub fn add_card(&mut self, owner: PlayerId, name: &str, zone: Zone) -> Result<CardId> {
        self.add_card_with_metadata(owner, name, zone, CardMetadata::default())
    }

    /// Like `add_card`, with display data the engine carries but never reads
    pub fn add_card_with_metadata(
        &mut self,
        owner: PlayerId,
        name: &str,
        zone: Zone,
        metadata: CardMetadata,
    ) -> Result<CardId> {
        self.get_player(owner)?;
        let id = self.next_id();
        self.cards
            .insert(Card::new(id, name, owner, zone).with_metadata(metadata));
        Ok(id)
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(TableError::PlayerNotFound(id))
    }

    /// Get a mutable player by ID
    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TableError::PlayerNotFound(id))
    }

    /// Display name for a player, looked up from the id
    pub fn player_name(&self, id: PlayerId) -> Result<&PlayerName> {
        self.get_player(id).map(|p| &p.name)
    }

    pub fn get_card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id).ok_or(TableError::CardNotFound(id))
    }

    pub fn get_card_mut(&mut self, id: CardId) -> Result<&mut Card> {
        self.cards.get_mut(id).ok_or(TableError::CardNotFound(id))
    }

    /// Cards in one player's zone, bottom first (the last id is the top)
    pub fn cards_in_zone(&self, owner: PlayerId, zone: Zone) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| c.is_in(owner, zone))
            .map(|c| c.id)
            .collect()
    }

    pub fn zone_size(&self, owner: PlayerId, zone: Zone) -> usize {
        self.cards.iter().filter(|c| c.is_in(owner, zone)).count()
    }

    /// Up to `count` cards from the top of a player's library, top card first
    pub fn top_of_library(&self, owner: PlayerId, count: usize) -> Vec<CardId> {
        let library = self.cards_in_zone(owner, Zone::Library);
        library.into_iter().rev().take(count).collect()
    }

    /// Remove every card a player owns. Returns how many were removed.
    pub fn remove_cards_owned_by(&mut self, owner: PlayerId) -> usize {
        let before = self.cards.len();
        self.cards.retain(|c| c.owner != owner);
        for player in self.players.iter_mut() {
            if player.id == owner {
                player.commander = None;
            }
        }
        before - self.cards.len()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
