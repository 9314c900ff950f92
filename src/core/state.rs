//! Game state: the explicit session object every phase works on.
//!
//! ## GameState
//!
//! - Zone manager (every card's location)
//! - Shared RNG
//! - Turn phase and turn counter
//! - Per-player discard selection and final score
//! - Status message for the display layer
//!
//! The full deck is created in the discard pile when the state is built, so
//! all 52 cards are accounted for from the first observable moment.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::card::Card;
use super::config::{GameConfig, Zone};
use super::error::{EngineError, Result};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::zones::ZoneManager;

/// Where the turn state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Setup,
    /// No card selected yet.
    AwaitingDiscardSelection(PlayerId),
    /// One card selected; the player may confirm or change it.
    AwaitingDiscardConfirm(PlayerId),
    /// Discard done; choosing between the draw pile and the shop.
    AwaitingDrawChoice(PlayerId),
    ApplyingDrawChoice(PlayerId),
    FinalScoring,
    Done,
}

impl TurnPhase {
    /// The player whose turn it is, if any.
    #[must_use]
    pub fn active_player(self) -> Option<PlayerId> {
        match self {
            TurnPhase::AwaitingDiscardSelection(p)
            | TurnPhase::AwaitingDiscardConfirm(p)
            | TurnPhase::AwaitingDrawChoice(p)
            | TurnPhase::ApplyingDrawChoice(p) => Some(p),
            TurnPhase::Setup | TurnPhase::FinalScoring | TurnPhase::Done => None,
        }
    }
}

/// Full game state.
///
/// Zones and RNG are public like the rest of the engine's building blocks;
/// selection and scores go through methods that hold their invariants.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,

    /// Zone manager for card locations.
    pub zones: ZoneManager,

    /// Shared deterministic RNG.
    pub rng: GameRng,

    phase: TurnPhase,

    /// Turns started so far.
    turn_number: u32,

    /// At most one selected card per hand.
    selected: PlayerMap<Option<Card>>,

    /// Placement, assigned once during scoring.
    final_scores: PlayerMap<Option<u32>>,

    message: Option<String>,
}

impl GameState {
    /// Create a new game state with the deck in the discard pile.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let player_count = config.player_count;

        Ok(Self {
            zones: ZoneManager::with_cards(Zone::DiscardPile, Card::standard_deck()),
            rng: GameRng::new(config.seed),
            phase: TurnPhase::Setup,
            turn_number: 0,
            selected: PlayerMap::with_default(player_count),
            final_scores: PlayerMap::with_default(player_count),
            message: None,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Iterate over all player IDs in seating order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> String {
        self.config.player_name(player)
    }

    /// Every player's hand zone, in seating order.
    #[must_use]
    pub fn hand_zones(&self) -> Vec<Zone> {
        self.player_ids().map(Zone::Hand).collect()
    }

    // === Phase ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Count a new turn and return its number (starts at 1).
    pub fn begin_turn(&mut self) -> u32 {
        self.turn_number += 1;
        self.turn_number
    }

    // === Selection ===

    /// The card a player has marked for discard.
    #[must_use]
    pub fn selected(&self, player: PlayerId) -> Option<Card> {
        self.selected[player]
    }

    /// Mark `card` as the player's discard, replacing any previous mark.
    ///
    /// The card must be in the player's hand.
    pub fn select(&mut self, player: PlayerId, card: Card) -> Result<()> {
        let hand = Zone::Hand(player);
        if !self.zones.contains(hand, card) {
            return Err(EngineError::CardNotFound { card, zone: hand });
        }
        self.selected[player] = Some(card);
        Ok(())
    }

    pub fn clear_selection(&mut self, player: PlayerId) {
        self.selected[player] = None;
    }

    /// Cards in hand that are not selected, in hand order.
    #[must_use]
    pub fn unselected_cards(&self, player: PlayerId) -> Vec<Card> {
        let selected = self.selected[player];
        self.zones
            .iter(Zone::Hand(player))
            .filter(|&card| Some(card) != selected)
            .collect()
    }

    // === Scores ===

    #[must_use]
    pub fn final_score(&self, player: PlayerId) -> Option<u32> {
        self.final_scores[player]
    }

    /// Record a player's placement.
    pub fn set_final_score(&mut self, player: PlayerId, placement: u32) {
        debug_assert!(
            self.final_scores[player].is_none(),
            "final score for {player} assigned twice"
        );
        self.final_scores[player] = Some(placement);
    }

    /// One score per seat, 0 for a player never placed.
    #[must_use]
    pub fn scores(&self) -> Vec<u32> {
        self.final_scores.values().map(|s| s.unwrap_or(0)).collect()
    }

    // === Status message ===

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Replace the status message shown to players.
    pub fn announce(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(phase = ?self.phase, "{}", message);
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Check that all 52 cards are in exactly one zone.
    #[must_use]
    pub fn cards_conserved(&self) -> bool {
        self.zones.conserves(&Card::standard_deck())
    }
}
