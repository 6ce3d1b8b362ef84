//! Player intents and the action processor
//!
//! `process` validates an `Action` against the current state and expands it
//! into the effects that carry it out. It reads the state but never writes
//! it: an action either yields its full effect list or an error, never a
//! partial result.

use crate::core::{CardId, PlayerId};
use crate::game::effects::{Effect, EffectList};
use crate::game::shuffle::Shuffler;
use crate::game::GameState;
use crate::zones::Zone;
use crate::{Result, TableError};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

fn library() -> Zone {
    Zone::Library
}

/// Intents a client may send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Put a card from the player's hand onto the battlefield
    PlayCard { player: PlayerId, card: CardId },

    Tap { player: PlayerId, card: CardId },

    Untap { player: PlayerId, card: CardId },

    /// Move a card to any zone; the source zone is read from the state
    MoveCard {
        player: PlayerId,
        card: CardId,
        to: Zone,
    },

    /// Draw up to `count` cards from the top of the library
    Draw { player: PlayerId, count: u32 },

    /// Shuffle one of the player's zones (normally the library)
    Shuffle {
        player: PlayerId,
        #[serde(default = "library")]
        zone: Zone,
    },

    /// Gain (positive) or lose (negative) life
    ModifyLife { player: PlayerId, delta: i32 },

    /// Any action type this build does not recognize
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Acting player, if the action names one
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Action::PlayCard { player, .. }
            | Action::Tap { player, .. }
            | Action::Untap { player, .. }
            | Action::MoveCard { player, .. }
            | Action::Draw { player, .. }
            | Action::Shuffle { player, .. }
            | Action::ModifyLife { player, .. } => Some(*player),
            Action::Unknown => None,
        }
    }

    /// Wire tag of this action
    pub fn kind(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "play_card",
            Action::Tap { .. } => "tap",
            Action::Untap { .. } => "untap",
            Action::MoveCard { .. } => "move_card",
            Action::Draw { .. } => "draw",
            Action::Shuffle { .. } => "shuffle",
            Action::ModifyLife { .. } => "modify_life",
            Action::Unknown => "unknown",
        }
    }
}

/// Validate `action` and expand it into effects
///
/// `shuffler` is only consulted by `Action::Shuffle`.
pub fn process(state: &GameState, action: &Action, shuffler: &mut dyn Shuffler) -> Result<EffectList> {
    match action {
        Action::PlayCard { player, card } => play_card(state, *player, *card),
        Action::Tap { player, card } => {
            state.get_player(*player)?;
            let c = state.get_card(*card)?;
            if c.tapped {
                return Err(TableError::AlreadyTapped(*card));
            }
            Ok(smallvec![Effect::Tap { card: *card }])
        }
        Action::Untap { player, card } => {
            state.get_player(*player)?;
            let c = state.get_card(*card)?;
            if !c.tapped {
                return Err(TableError::AlreadyUntapped(*card));
            }
            Ok(smallvec![Effect::Untap { card: *card }])
        }
        Action::MoveCard { player, card, to } => move_card(state, *player, *card, *to),
        Action::Draw { player, count } => draw(state, *player, *count),
        Action::Shuffle { player, zone } => shuffle(state, *player, *zone, shuffler),
        Action::ModifyLife { player, delta } => {
            let p = state.get_player(*player)?;
            // Every accepted delta must be exactly reversible by its negation
            if *delta == i32::MIN || p.life.checked_add(*delta).is_none() {
                return Err(TableError::LifeOutOfRange {
                    player: *player,
                    life: p.life,
                    delta: *delta,
                });
            }
            let name = &p.name;
            let detail = match delta.signum() {
                1 => format!("{name} gained {delta} life"),
                -1 => format!("{name} lost {} life", delta.unsigned_abs()),
                _ => format!("{name}'s life is unchanged"),
            };
            Ok(smallvec![
                Effect::ModifyLife {
                    player: *player,
                    delta: *delta,
                },
                log_effect("Life", detail),
            ])
        }
        Action::Unknown => Err(TableError::UnknownActionType(action.kind().to_string())),
    }
}

fn log_effect(label: &str, detail: String) -> Effect {
    Effect::AddLogEntry {
        label: label.to_string(),
        detail,
    }
}

/// Order effect that puts `arriving` on top of `owner`'s `zone`, in the order given
///
/// Moves only relabel cards, so without this a card entering a zone would
/// sit wherever its storage slot happens to be. `previous` is the zone as it
/// will look right after the moves are applied. Returns `None` when the
/// arriving cards already end up on top.
fn arrive_on_top(state: &GameState, owner: PlayerId, zone: Zone, arriving: &[CardId]) -> Option<Effect> {
    let previous: Vec<CardId> = state
        .cards
        .iter()
        .filter(|c| c.is_in(owner, zone) || (c.is_owned_by(owner) && arriving.contains(&c.id)))
        .map(|c| c.id)
        .collect();
    let mut order: Vec<CardId> = previous
        .iter()
        .copied()
        .filter(|id| !arriving.contains(id))
        .collect();
    order.extend_from_slice(arriving);

    (order != previous).then_some(Effect::SetZoneOrder {
        owner,
        zone,
        order,
        previous,
    })
}

fn play_card(state: &GameState, player: PlayerId, card: CardId) -> Result<EffectList> {
    let name = state.player_name(player)?;
    let c = state.get_card(card)?;
    if c.zone != Zone::Hand {
        return Err(TableError::InvalidZone {
            card,
            expected: Zone::Hand,
            actual: c.zone,
        });
    }
    if !c.is_owned_by(player) {
        return Err(TableError::NotOwner { card, player });
    }

    let mut effects: EffectList = smallvec![Effect::MoveZone {
        card,
        from: Zone::Hand,
        to: Zone::Battlefield,
    }];
    effects.extend(arrive_on_top(state, c.owner, Zone::Battlefield, &[card]));
    effects.push(log_effect("Play", format!("{name} played {}", c.name)));
    Ok(effects)
}

fn move_card(state: &GameState, player: PlayerId, card: CardId, to: Zone) -> Result<EffectList> {
    let name = state.player_name(player)?;
    let c = state.get_card(card)?;
    let mut effects = EffectList::new();

    // Untap explicitly so the tapped flag comes back on undo; the applier
    // would clear it silently otherwise.
    if c.tapped && to.clears_tapped() {
        effects.push(Effect::Untap { card });
    }
    effects.push(Effect::MoveZone {
        card,
        from: c.zone,
        to,
    });
    effects.extend(arrive_on_top(state, c.owner, to, &[card]));
    effects.push(log_effect("Move", format!("{name} moved {} to {to}", c.name)));
    Ok(effects)
}

fn draw(state: &GameState, player: PlayerId, count: u32) -> Result<EffectList> {
    let name = state.player_name(player)?;
    let drawn = state.top_of_library(player, count as usize);

    let mut effects: EffectList = drawn
        .iter()
        .map(|&card| Effect::MoveZone {
            card,
            from: Zone::Library,
            to: Zone::Hand,
        })
        .collect();
    effects.extend(arrive_on_top(state, player, Zone::Hand, &drawn));
    let plural = if drawn.len() == 1 { "" } else { "s" };
    effects.push(log_effect("Draw", format!("{name} drew {} card{plural}", drawn.len())));
    Ok(effects)
}

fn shuffle(state: &GameState, player: PlayerId, zone: Zone, shuffler: &mut dyn Shuffler) -> Result<EffectList> {
    let name = state.player_name(player)?;
    let previous = state.cards_in_zone(player, zone);
    let mut order = previous.clone();
    shuffler.permute(&mut order);

    Ok(smallvec![
        Effect::SetZoneOrder {
            owner: player,
            zone,
            order,
            previous,
        },
        log_effect("Shuffle", format!("{name} shuffled their {zone}")),
    ])
}
