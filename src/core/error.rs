//! Engine error taxonomy.
//!
//! None of these are recovered from inside the engine. A failed step ends
//! the run and the error reaches the caller of `Game::run`; restarting is
//! the host's decision.

use thiserror::Error;

use super::card::Card;
use super::config::Zone;
use super::player::PlayerId;
use crate::prompt::Target;

/// Errors raised by the turn engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A card was expected in a zone it is not in.
    #[error("card {card} is not in {zone}")]
    CardNotFound { card: Card, zone: Zone },

    /// A deal or draw asked for more cards than the zone holds.
    #[error("{zone} holds {available} cards, {requested} requested")]
    InsufficientCards {
        zone: Zone,
        requested: usize,
        available: usize,
    },

    /// The click input closed before any offered action resolved.
    #[error("input for {player} closed before any action resolved")]
    ActionAborted { player: PlayerId },

    /// A race was started without candidates.
    #[error("no actions were offered to {player}")]
    NoCandidates { player: PlayerId },

    #[error("unsupported player count {0}")]
    InvalidPlayerCount(usize),

    #[error("game has already been set up")]
    AlreadyStarted,

    /// Final scoring was started a second time.
    #[error("final scores have already been assigned")]
    AlreadyScored,

    /// A commit received a target its prompt never offered.
    #[error("{player} answered with unexpected target {target}")]
    UnexpectedTarget { player: PlayerId, target: Target },
}

/// Result alias used throughout the engine.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
