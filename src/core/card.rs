//! Card instances on the table

use crate::core::{CardId, CardName, GameEntity, PlayerId};
use crate::zones::Zone;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Descriptive card data carried through the engine untouched
///
/// The engine never interprets these fields; they exist so that clients can
/// render the card from the broadcast state alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,

    /// Image references (front face first)
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub image_uris: SmallVec<[String; 2]>,
}

/// Represents a card on the table
///
/// A card is created once and mutated in place for the rest of the session;
/// changing zones relabels it rather than replacing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this card instance
    pub id: CardId,

    /// Card name (e.g., "Lightning Bolt")
    pub name: CardName,

    /// Player who owns this card
    pub owner: PlayerId,

    /// Zone the card currently occupies
    pub zone: Zone,

    /// Is the card tapped? Only meaningful on the battlefield.
    pub tapped: bool,

    /// Position hint supplied by whoever built the deck. Storage order in
    /// the state tree is authoritative; this is passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    #[serde(default)]
    pub metadata: CardMetadata,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<CardName>, owner: PlayerId, zone: Zone) -> Self {
        Card {
            id,
            name: name.into(),
            owner,
            zone,
            tapped: false,
            sequence: None,
            metadata: CardMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: CardMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == player
    }

    /// Is this card in `zone` on `owner`'s side of the table?
    pub fn is_in(&self, owner: PlayerId, zone: Zone) -> bool {
        self.owner == owner && self.zone == zone
    }
}

impl GameEntity<Card> for Card {
    fn id(&self) -> CardId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
