//! Table state, the action/effect pipeline and sessions

pub mod actions;
pub mod display_log;
pub mod effects;
pub mod logger;
pub mod replay;
pub mod session;
pub mod shuffle;
pub mod state;
pub mod state_hash;

pub use actions::{process, Action};
pub use display_log::{DisplayLog, DisplayLogEntry};
pub use effects::{invert_all, Effect, EffectList};
pub use logger::{GameLogger, OutputFormat, OutputMode, VerbosityLevel};
pub use replay::ReplayRecord;
pub use session::{DispatchOutcome, GameSession};
pub use shuffle::{IdentityShuffler, SeededShuffler, Shuffler};
pub use state::GameState;
pub use state_hash::{compute_state_hash, format_hash};

/// Milliseconds since the Unix epoch (0 if the clock is before it)
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
