//! # rust-shopdraw
//!
//! Turn engine for a discard-and-draw poker card game with a shared shop.
//!
//! Each player holds five cards. On their turn a player selects a card,
//! may change their mind any number of times, confirms the discard, then
//! draws either blind from the draw pile or face up from a three-card shop.
//! When the draw pile runs out, players are ranked by their best poker hand.
//!
//! ## Design Principles
//!
//! 1. **Explicit Session**: All state lives in one `GameState` passed by
//!    reference into every phase. There is no global game.
//!
//! 2. **Card Conservation**: Every one of the 52 cards is in exactly one
//!    zone at every point between steps. The `ZoneManager` enforces it.
//!
//! 3. **First Commit Wins**: Player input is a race between candidate
//!    actions. Only the winner's effect is ever applied.
//!
//! ## Architecture
//!
//! - **Single-threaded cooperative execution**: the engine is a future
//!   driven by one executor. State changes happen between awaits, so no
//!   locking is needed.
//!
//! - **Injected services**: hand ranking (`HandEvaluator`), click input (a
//!   `Stream` of `Click`s) and pacing (`Pacer`) come from the host.
//!
//! ## Modules
//!
//! - `core`: Cards, players, RNG, configuration, errors, state
//! - `zones`: Card flow between the draw pile, discard pile, shop and hands
//! - `prompt`: Click offers and routing
//! - `choice`: Racing candidate actions
//! - `rules`: Setup, turns, scoring
//! - `view`: Read-only projection for rendering

pub mod core;
pub mod zones;
pub mod prompt;
pub mod choice;
pub mod rules;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    Card, EngineError, GameConfig, GameRng, GameState, PlayerId, PlayerMap, Rank, Result, Suit,
    TurnPhase, Zone,
};
pub use crate::zones::ZoneManager;
pub use crate::prompt::{Click, OfferView, PromptBoard, Target};
pub use crate::choice::{ChoiceResolver, PendingAction};
pub use crate::rules::{BestHand, Delay, Game, GameResult, HandEvaluator, NoDelay, Pacer};
pub use crate::view::TableView;
