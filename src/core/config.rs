//! Game configuration and zone identifiers.
//!
//! The rules are fixed: a 52-card deck, 5-card starting hands, a 3-card
//! shop and a single discard-then-draw turn. What a host does configure is
//! the table: how many players, their names, and the RNG seed.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::PlayerId;

/// Cards in the deck.
pub const DECK_SIZE: usize = 52;

/// Cards dealt to each player at setup.
pub const STARTING_HAND_SIZE: usize = 5;

/// Cards exposed in the shop after setup and after each shop refresh.
pub const SHOP_SIZE: usize = 3;

/// Largest table the deck can seat with at least one card left to draw.
pub const MAX_PLAYERS: usize = (DECK_SIZE - SHOP_SIZE - 1) / STARTING_HAND_SIZE;

/// Zone identifier.
///
/// Every card is in exactly one zone at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Face-down pile players draw from. Its depletion ends the game.
    DrawPile,
    /// Face-up pile discards and swept shop cards go to.
    DiscardPile,
    /// Face-up cards any player may take from on their turn.
    Shop,
    /// A player's hand.
    Hand(PlayerId),
}

/// Zone visibility rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneVisibility {
    /// Cards face up.
    Public,
    /// Cards face down, only the count is known.
    Hidden,
}

impl Zone {
    /// Human-readable label used in messages and by the display layer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Zone::DrawPile => "Draw Pile",
            Zone::DiscardPile => "Discard Pile",
            Zone::Shop => "Shop",
            Zone::Hand(_) => "Hand",
        }
    }

    #[must_use]
    pub const fn visibility(self) -> ZoneVisibility {
        match self {
            Zone::DrawPile => ZoneVisibility::Hidden,
            _ => ZoneVisibility::Public,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Hand(player) => write!(f, "{player}'s Hand"),
            zone => f.write_str(zone.label()),
        }
    }
}

/// Table configuration.
///
/// ```
/// use rust_shopdraw::core::GameConfig;
///
/// let config = GameConfig::new(3, 42).with_names(["Ann", "Bo", "Cy"]);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.player_name(rust_shopdraw::core::PlayerId::new(1)), "Bo");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats.
    pub player_count: usize,

    /// Seed for the shared RNG.
    pub seed: u64,

    /// Display names, indexed by seat. Missing names fall back to the seat.
    #[serde(default)]
    pub player_names: Vec<String>,
}

impl GameConfig {
    /// Create a configuration with default player names.
    pub fn new(player_count: usize, seed: u64) -> Self {
        Self {
            player_count,
            seed,
            player_names: Vec::new(),
        }
    }

    /// Set display names.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Display name for a seat.
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> String {
        self.player_names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }

    /// Check that the deck can seat this many players.
    pub fn validate(&self) -> Result<()> {
        if (1..=MAX_PLAYERS).contains(&self.player_count) {
            Ok(())
        } else {
            Err(EngineError::InvalidPlayerCount(self.player_count))
        }
    }
}
