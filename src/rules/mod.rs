//! Game rules: setup, the turn state machine and final scoring.
//!
//! The rules are fixed. What varies is injected: how hands are ranked
//! (`HandEvaluator`), where clicks come from (the `ChoiceResolver`'s input
//! stream) and how long to pause between steps (`Pacer`).
//!
//! ## Key Types
//!
//! - `Game`: one session and its services
//! - `GameResult`: placement per seat
//! - `HandEvaluator`, `BestHand`: the injected hand ranking
//! - `Pacer`, `Delay`, `NoDelay`: presentation pacing

pub mod engine;
pub mod eval;
pub mod pacing;
pub mod scoring;
mod setup;
mod turn;

pub use engine::{Game, GameResult};
pub use eval::{BestHand, HandEvaluator};
pub use pacing::{Delay, NoDelay, Pacer};
pub use scoring::{rank_entries, score_entries, ScoringEntry};
