//! Core engine types: cards, players, RNG, configuration, errors, state.
//!
//! Everything the turn engine, card flow and scoring share lives here.

pub mod card;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use card::{Card, ParseCardError, Rank, Suit};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, Zone, ZoneVisibility, DECK_SIZE, MAX_PLAYERS, SHOP_SIZE, STARTING_HAND_SIZE};
pub use error::{EngineError, Result};
pub use state::{GameState, TurnPhase};
