//! Effects: the only unit of state mutation
//!
//! Every change to a `GameState` goes through `GameState::apply`. Each effect
//! carries enough data to be applied and to compute its own inverse, which is
//! how undo works.

use crate::core::{CardId, PlayerId};
use crate::game::display_log::DisplayLogEntry;
use crate::game::logger::GameLogger;
use crate::game::{now_millis, GameState};
use crate::zones::Zone;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Atomic, invertible state mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Relabel a card's zone
    MoveZone { card: CardId, from: Zone, to: Zone },

    Tap { card: CardId },

    Untap { card: CardId },

    /// Add a signed amount to a life total (positive = gain)
    ModifyLife { player: PlayerId, delta: i32 },

    /// Rearrange one player's zone to `order`, bottom first.
    /// `previous` is the order before, kept for inversion.
    SetZoneOrder {
        owner: PlayerId,
        zone: Zone,
        order: Vec<CardId>,
        previous: Vec<CardId>,
    },

    /// Prepend a line to the rolling display log
    AddLogEntry { label: String, detail: String },

    /// Does nothing. The inverse of `AddLogEntry`.
    Noop,
}

/// Effects produced by one action; most actions produce two or three
pub type EffectList = SmallVec<[Effect; 4]>;

impl Effect {
    /// The effect that reverses this one
    ///
    /// Display log entries are not rolled back: their inverse is `Noop`.
    pub fn invert(&self) -> Effect {
        match self {
            Effect::MoveZone { card, from, to } => Effect::MoveZone {
                card: *card,
                from: *to,
                to: *from,
            },
            Effect::Tap { card } => Effect::Untap { card: *card },
            Effect::Untap { card } => Effect::Tap { card: *card },
            // The processor never emits i32::MIN, so negation is exact
            Effect::ModifyLife { player, delta } => Effect::ModifyLife {
                player: *player,
                delta: delta.wrapping_neg(),
            },
            Effect::SetZoneOrder {
                owner,
                zone,
                order,
                previous,
            } => Effect::SetZoneOrder {
                owner: *owner,
                zone: *zone,
                order: previous.clone(),
                previous: order.clone(),
            },
            Effect::AddLogEntry { .. } | Effect::Noop => Effect::Noop,
        }
    }

    /// Short description for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Effect::MoveZone { card, from, to } => format!("move card {card} {from} -> {to}"),
            Effect::Tap { card } => format!("tap card {card}"),
            Effect::Untap { card } => format!("untap card {card}"),
            Effect::ModifyLife { player, delta } => format!("life of player {player} {delta:+}"),
            Effect::SetZoneOrder { owner, zone, order, .. } => {
                format!("reorder {zone} of player {owner} ({} cards)", order.len())
            }
            Effect::AddLogEntry { label, detail } => format!("log [{label}] {detail}"),
            Effect::Noop => "noop".to_string(),
        }
    }
}

/// Inverses of `effects`, in the order they must be applied to undo them
pub fn invert_all(effects: &[Effect]) -> EffectList {
    effects.iter().rev().map(Effect::invert).collect()
}

impl GameState {
    /// Apply one effect in place
    ///
    /// Never fails. Effects are validated by the processor before they get
    /// here; a reference to a card or player that no longer exists is
    /// reported through `logger` and skipped.
    pub fn apply(&mut self, effect: &Effect, logger: &GameLogger) {
        match effect {
            Effect::MoveZone { card, to, .. } => match self.cards.get_mut(*card) {
                Some(c) => {
                    c.zone = *to;
                    if to.clears_tapped() {
                        c.untap();
                    }
                }
                None => logger.warn(&format!("move-zone skipped: card {card} not found")),
            },
            Effect::Tap { card } => match self.cards.get_mut(*card) {
                Some(c) => c.tap(),
                None => logger.warn(&format!("tap skipped: card {card} not found")),
            },
            Effect::Untap { card } => match self.cards.get_mut(*card) {
                Some(c) => c.untap(),
                None => logger.warn(&format!("untap skipped: card {card} not found")),
            },
            Effect::ModifyLife { player, delta } => match self.get_player_mut(*player) {
                Ok(p) => p.adjust_life(*delta),
                Err(_) => logger.warn(&format!("modify-life skipped: player {player} not found")),
            },
            Effect::SetZoneOrder {
                owner, zone, order, ..
            } => {
                let (owner, zone) = (*owner, *zone);
                self.cards.reorder_where(|c| c.is_in(owner, zone), order);
            }
            Effect::AddLogEntry { label, detail } => {
                self.display_log.push(DisplayLogEntry {
                    label: label.clone(),
                    detail: detail.clone(),
                    timestamp_ms: now_millis(),
                });
            }
            Effect::Noop => {}
        }
    }

    /// Apply effects in order
    pub fn apply_all<'a>(&mut self, effects: impl IntoIterator<Item = &'a Effect>, logger: &GameLogger) {
        for effect in effects {
            self.apply(effect, logger);
        }
    }
}
