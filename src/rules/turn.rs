//! One player's turn: choose and confirm a discard, then draw.
//!
//! ## Discard selection
//!
//! Each iteration races two candidates: select one of the unselected cards
//! in hand (loops, replacing the selection) and, while a card is selected,
//! the Discard button (ends the loop with that card).
//!
//! ## Draw choice
//!
//! One race between the draw pile and any card in the shop. Taking a shop
//! card refills the shop by one; drawing blind sweeps the shop to the
//! discard pile and refills it from the draw pile.

use std::ops::ControlFlow;

use futures::Stream;
use tracing::debug;

use super::engine::Game;
use super::eval::HandEvaluator;
use super::pacing::{Delay, Pacer};
use crate::choice::PendingAction;
use crate::core::{Card, EngineError, GameState, PlayerId, Result, TurnPhase, Zone, SHOP_SIZE};
use crate::prompt::{Click, PromptBoard, Target};

/// Where the player chose to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DrawChoice {
    Shop(Card),
    DrawPile,
}

impl<E, S, P> Game<E, S, P>
where
    E: HandEvaluator,
    S: Stream<Item = Click> + Unpin,
    P: Pacer,
{
    /// Play one full turn for `player`.
    pub async fn play_turn(&mut self, player: PlayerId) -> Result<()> {
        let name = self.state.player_name(player);
        let turn = self.state.begin_turn();
        debug!(%player, turn, "turn started");

        self.state.set_phase(TurnPhase::AwaitingDiscardSelection(player));
        self.state.announce(format!("It's {name}'s turn to discard a card!"));

        let discard = self
            .resolver
            .race_until(&mut self.state, player, |state, board| {
                discard_candidates(state, board, player)
            })
            .await?;

        self.state.zones.move_one(Zone::Hand(player), Zone::DiscardPile, discard)?;
        self.state.clear_selection(player);
        self.state.announce(format!("{name} discards their {discard}!"));
        self.pause(Delay::Short).await;

        self.state.set_phase(TurnPhase::AwaitingDrawChoice(player));
        self.state.announce(format!("Now {name} can draw from the Draw Pile or the Shop"));

        let choice = self
            .resolver
            .race(&mut self.state, player, |state, board| {
                draw_candidates(state, board, player)
            })
            .await?;

        self.state.set_phase(TurnPhase::ApplyingDrawChoice(player));
        let hand = Zone::Hand(player);
        match choice {
            DrawChoice::Shop(card) => {
                self.state.zones.move_one(Zone::Shop, hand, card)?;
                self.state.announce(format!("{name} takes a {card} from the Shop!"));
                self.pause(Delay::Beat).await;

                self.state.zones.draw_into(Zone::DrawPile, Zone::Shop, 1);
                self.pause(Delay::Beat).await;
            }
            DrawChoice::DrawPile => {
                let card = self.state.zones.move_top(Zone::DrawPile, hand)?;
                debug!(%player, %card, "drew blind");
                self.state
                    .announce(format!("{name} draws from the Draw Pile, refilling the Shop!"));
                self.pause(Delay::Beat).await;

                self.state.zones.move_all(Zone::Shop, Zone::DiscardPile);
                self.pause(Delay::Beat).await;

                self.state.zones.draw_into(Zone::DrawPile, Zone::Shop, SHOP_SIZE);
                self.pause(Delay::Beat).await;
            }
        }

        Ok(())
    }
}

fn discard_candidates(
    state: &GameState,
    board: &PromptBoard,
    player: PlayerId,
) -> Vec<PendingAction<'static, GameState, ControlFlow<Card>>> {
    let mut candidates = Vec::with_capacity(2);
    let selected = state.selected(player);

    let unselected = state.unselected_cards(player);
    if !unselected.is_empty() {
        let message = if selected.is_some() {
            "Select a different card"
        } else {
            "Select a card to discard"
        };
        let prompt = board.click_any(player, unselected.into_iter().map(Target::Card), message);
        candidates.push(PendingAction::new(
            "select",
            prompt,
            move |state: &mut GameState, target: Target| {
                let card = target
                    .card()
                    .ok_or(EngineError::UnexpectedTarget { player, target })?;
                state.select(player, card)?;
                state.set_phase(TurnPhase::AwaitingDiscardConfirm(player));
                Ok(ControlFlow::Continue(()))
            },
        ));
    }

    if let Some(card) = selected {
        let prompt = board.click(player, Target::DiscardButton, "Discard");
        candidates.push(PendingAction::new(
            "confirm",
            prompt,
            move |_: &mut GameState, _: Target| Ok(ControlFlow::Break(card)),
        ));
    }

    candidates
}

fn draw_candidates(
    state: &GameState,
    board: &PromptBoard,
    player: PlayerId,
) -> Vec<PendingAction<'static, GameState, DrawChoice>> {
    let mut candidates = Vec::with_capacity(2);

    if !state.zones.is_empty(Zone::DrawPile) {
        let prompt = board.click(player, Target::DrawPile, "Click on the Draw Pile");
        candidates.push(PendingAction::new(
            "draw pile",
            prompt,
            |_: &mut GameState, _: Target| Ok(DrawChoice::DrawPile),
        ));
    }

    let shop: Vec<Target> = state.zones.iter(Zone::Shop).map(Target::Card).collect();
    if !shop.is_empty() {
        let prompt = board.click_any(player, shop, "Click on any card in the Shop");
        candidates.push(PendingAction::new(
            "shop",
            prompt,
            move |_: &mut GameState, target: Target| {
                target
                    .card()
                    .map(DrawChoice::Shop)
                    .ok_or(EngineError::UnexpectedTarget { player, target })
            },
        ));
    }

    candidates
}
