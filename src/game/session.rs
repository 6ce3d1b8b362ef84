//! Game session: the single owner of one table's state
//!
//! `dispatch` runs processor -> applier -> history as one synchronous step;
//! `undo` pops the last transaction and applies its inverted effects in
//! reverse. Both run to completion before returning, so callers never observe
//! a half-applied action. One session per room; sessions share nothing.

/// Emit one line per applied effect, compiled out without `verbose-logging`
macro_rules! log_effect {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.effect(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

use crate::config::SessionConfig;
use crate::core::{CardId, CardMetadata, PlayerId};
use crate::game::actions::{process, Action};
use crate::game::display_log::DisplayLog;
use crate::game::effects::{invert_all, EffectList};
use crate::game::logger::GameLogger;
use crate::game::replay::ReplayRecord;
use crate::game::shuffle::{SeededShuffler, Shuffler};
use crate::game::{now_millis, GameState};
use crate::loader::DeckList;
use crate::undo::{History, HistoryEntry};
use crate::zones::Zone;
use crate::{Result, TableError};

/// What `dispatch` did with an accepted action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Effects were applied and one history entry was recorded
    Applied(EffectList),
    /// Unrecognized action type, tolerated: nothing changed
    Ignored,
}

pub struct GameSession {
    state: GameState,

    /// State the history starts from; replays begin here
    initial_state: GameState,

    history: History,

    shuffler: Box<dyn Shuffler + Send>,

    config: SessionConfig,

    logger: GameLogger,
}

impl GameSession {
    /// Empty table; shuffles seeded from `config.seed` (or OS entropy)
    pub fn new(config: SessionConfig) -> Self {
        let shuffler = match config.seed {
            Some(seed) => SeededShuffler::new(seed),
            None => SeededShuffler::from_entropy(),
        };
        Self::with_shuffler(config, Box::new(shuffler))
    }

    pub fn with_shuffler(config: SessionConfig, shuffler: Box<dyn Shuffler + Send>) -> Self {
        let state = GameState::with_display_log(DisplayLog::with_capacity(config.display_log_capacity));
        Self::from_parts(state, config, shuffler)
    }

    fn from_parts(state: GameState, config: SessionConfig, shuffler: Box<dyn Shuffler + Send>) -> Self {
        let mut logger = GameLogger::with_verbosity(config.verbosity);
        logger.set_output_format(config.output_format);
        GameSession {
            initial_state: state.clone(),
            state,
            history: History::new(),
            shuffler,
            logger,
            config,
        }
    }

    /// Create a session with the named players seated in order
    pub fn with_players(config: SessionConfig, names: &[&str]) -> Self {
        let mut session = Self::new(config);
        for name in names {
            session.add_player(name);
        }
        session
    }

    // ------------------------------------------------------------------
    // Setup
    //
    // Seating players and loading cards happen outside the action/effect
    // pipeline. Each setup call becomes the new starting point for history
    // and replay, so any recorded history is dropped.
    // ------------------------------------------------------------------

    pub fn add_player(&mut self, name: &str) -> PlayerId {
        let id = self.state.add_player(name, self.config.starting_life);
        self.rebaseline();
        id
    }

    pub fn add_card(&mut self, owner: PlayerId, name: &str, zone: Zone) -> Result<CardId> {
        self.add_card_with_metadata(owner, name, zone, CardMetadata::default())
    }

    /// Add a card carrying display data (cost, type line, images) for clients
    pub fn add_card_with_metadata(
        &mut self,
        owner: PlayerId,
        name: &str,
        zone: Zone,
        metadata: CardMetadata,
    ) -> Result<CardId> {
        let id = self.state.add_card_with_metadata(owner, name, zone, metadata)?;
        self.rebaseline();
        Ok(id)
    }

    /// Replace all of a player's cards with a freshly imported deck
    ///
    /// Main deck cards go to the library in list order (the last one ends up
    /// on top); commander entries go to the command zone and the first becomes
    /// the player's designated commander. Sideboards stay off the table.
    pub fn import_deck(&mut self, player: PlayerId, deck: &DeckList) -> Result<Vec<CardId>> {
        self.state.get_player(player)?;
        let removed = self.state.remove_cards_owned_by(player);

        let mut created = Vec::with_capacity(deck.total_cards());
        for entry in &deck.main_deck {
            for _ in 0..entry.count {
                created.push(self.state.add_card(player, &entry.card_name, Zone::Library)?);
            }
        }
        let mut commander = None;
        for entry in &deck.commander {
            for _ in 0..entry.count {
                let id = self.state.add_card(player, &entry.card_name, Zone::Command)?;
                commander.get_or_insert(id);
                created.push(id);
            }
        }
        self.state.get_player_mut(player)?.commander = commander;

        self.logger.minimal(&format!(
            "Imported {} cards for {} (replaced {removed})",
            created.len(),
            self.state.player_name(player)?
        ));
        self.rebaseline();
        Ok(created)
    }

    fn rebaseline(&mut self) {
        self.history.clear();
        self.initial_state = self.state.clone();
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Validate and commit one action
    ///
    /// On error nothing has been applied and history is unchanged.
    pub fn dispatch(&mut self, action: Action) -> Result<DispatchOutcome> {
        let kind = action.kind();
        let effects = match process(&self.state, &action, self.shuffler.as_mut()) {
            Ok(effects) => effects,
            Err(TableError::UnknownActionType(tag)) if !self.config.strict_actions => {
                self.logger
                    .warn(&format!("Ignoring unrecognized action type '{tag}'"));
                return Ok(DispatchOutcome::Ignored);
            }
            Err(e) => {
                self.logger.warn(&format!("Rejected {kind}: {e}"));
                return Err(e);
            }
        };

        for effect in &effects {
            self.state.apply(effect, &self.logger);
            log_effect!(self.logger, "applied {}", effect.describe());
        }

        let actor = action
            .player()
            .and_then(|p| self.state.player_name(p).ok())
            .map(|n| n.to_string())
            .unwrap_or_default();
        self.logger
            .normal(&format!("{actor}: {kind} ({} effects)", effects.len()));

        self.history.push(HistoryEntry {
            action,
            effects: effects.clone(),
            timestamp_ms: now_millis(),
        });
        Ok(DispatchOutcome::Applied(effects))
    }

    /// Revert the most recent transaction
    ///
    /// Returns false (and does nothing) when there is nothing to undo. The
    /// display log is not rolled back.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            self.logger.verbose("Nothing to undo");
            return false;
        };

        for inverse in invert_all(&entry.effects) {
            self.state.apply(&inverse, &self.logger);
            log_effect!(self.logger, "reverted with {}", inverse.describe());
        }
        self.logger.normal(&format!("Undid {}", entry.action.kind()));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    // ------------------------------------------------------------------
    // Views for collaborators
    // ------------------------------------------------------------------

    /// Current state, for the broadcast layer to diff and send
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn initial_state(&self) -> &GameState {
        &self.initial_state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    /// Replay record of everything since the last setup call
    pub fn record(&self) -> ReplayRecord {
        ReplayRecord::new(
            self.initial_state.clone(),
            self.history.entries().to_vec(),
            self.state.clone(),
        )
    }

    /// Close the session, handing its history to the persistence layer
    pub fn into_record(self) -> ReplayRecord {
        ReplayRecord::new(self.initial_state, self.history.into_entries(), self.state)
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("players", &self.state.players.len())
            .field("cards", &self.state.cards.len())
            .field("history", &self.history.len())
            .field("config", &self.config)
            .finish()
    }
}
