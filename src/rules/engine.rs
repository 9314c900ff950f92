//! The game runner.
//!
//! `Game` bundles the explicit session state with the services the rules
//! consume: the hand evaluator, the choice resolver (and through it the
//! click input) and the pacer. Every phase takes `&mut self` and works on
//! that one session; there is no global game.
//!
//! ## Lifecycle
//!
//! `setup` → `choose_first_player` → `play_turn` while the draw pile is not
//! empty at the start of a turn → `final_scoring`. `run` does all of it.

use futures::Stream;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

use super::eval::HandEvaluator;
use super::pacing::{Delay, NoDelay, Pacer};
use crate::choice::ChoiceResolver;
use crate::core::{GameConfig, GameState, PlayerId, Result, Zone};
use crate::prompt::{Click, PromptBoard};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Placement per seat: 1 is the weakest hand, `player_count` the
    /// strongest.
    pub scores: Vec<u32>,
}

impl GameResult {
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores.get(player.index()).copied().unwrap_or(0)
    }

    /// The seat with the highest placement.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        (0..self.scores.len())
            .max_by_key(|&i| self.scores[i])
            .map(|i| PlayerId::new(i as u8))
    }
}

/// One game session.
pub struct Game<E, S, P = NoDelay> {
    pub(super) state: GameState,
    pub(super) evaluator: E,
    pub(super) resolver: ChoiceResolver<S>,
    pub(super) pacer: P,
}

impl<E, S> Game<E, S>
where
    E: HandEvaluator,
    S: Stream<Item = Click> + Unpin,
{
    /// Create a game that never pauses between steps.
    ///
    /// Fails with `InvalidPlayerCount` if the configuration is rejected.
    pub fn new(config: GameConfig, evaluator: E, resolver: ChoiceResolver<S>) -> Result<Self> {
        Ok(Self {
            state: GameState::new(config)?,
            evaluator,
            resolver,
            pacer: NoDelay,
        })
    }
}

impl<E, S, P> Game<E, S, P>
where
    E: HandEvaluator,
    S: Stream<Item = Click> + Unpin,
    P: Pacer,
{
    /// Replace the pacer.
    #[must_use]
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> Game<E, S, Q> {
        Game {
            state: self.state,
            evaluator: self.evaluator,
            resolver: self.resolver,
            pacer,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access, for hosts and tests arranging a position.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The board the display layer reads open offers from.
    #[must_use]
    pub fn board(&self) -> &PromptBoard {
        self.resolver.board()
    }

    /// Play the whole game and return one placement per seat.
    ///
    /// Any error ends the run; nothing is retried or rolled back.
    pub async fn run(&mut self) -> Result<GameResult> {
        self.setup().await?;

        let mut player = self.choose_first_player();
        while !self.state.zones.is_empty(Zone::DrawPile) {
            let turn = self.state.turn_number() + 1;
            self.play_turn(player)
                .instrument(info_span!("turn", %player, turn))
                .await?;
            debug_assert!(self.state.cards_conserved(), "cards lost or duplicated in turn {turn}");
            player = player.next(self.state.player_count());
        }

        self.final_scoring().await?;

        let result = GameResult {
            scores: self.state.scores(),
        };
        info!(scores = ?result.scores, turns = self.state.turn_number(), "game over");
        Ok(result)
    }

    /// Pick the opening player uniformly at random.
    pub fn choose_first_player(&mut self) -> PlayerId {
        let seats: Vec<PlayerId> = self.state.player_ids().collect();
        let first = self
            .state
            .rng
            .choose(&seats)
            .copied()
            .unwrap_or(PlayerId::new(0));
        debug!(%first, "first player chosen");
        first
    }

    pub(super) async fn pause(&self, delay: Delay) {
        self.pacer.pause(delay).await;
    }
}

impl<E, S, P> std::fmt::Debug for Game<E, S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
