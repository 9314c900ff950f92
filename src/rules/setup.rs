//! Setup: shuffle, build the draw pile, deal hands, fill the shop.

use futures::Stream;
use tracing::debug;

use super::engine::Game;
use super::eval::HandEvaluator;
use super::pacing::{Delay, Pacer};
use crate::core::{EngineError, Result, TurnPhase, Zone, SHOP_SIZE, STARTING_HAND_SIZE};
use crate::prompt::Click;

impl<E, S, P> Game<E, S, P>
where
    E: HandEvaluator,
    S: Stream<Item = Click> + Unpin,
    P: Pacer,
{
    /// Shuffle the deck into the draw pile, deal starting hands and fill the
    /// shop.
    ///
    /// Fails with `AlreadyStarted` once the deck has left the discard pile.
    pub async fn setup(&mut self) -> Result<()> {
        if self.state.phase() != TurnPhase::Setup || !self.state.zones.is_empty(Zone::DrawPile) {
            return Err(EngineError::AlreadyStarted);
        }

        self.state.announce("Setting up the deck...");
        let state = &mut self.state;
        state.zones.shuffle(Zone::DiscardPile, &mut state.rng);
        state.zones.move_all(Zone::DiscardPile, Zone::DrawPile);
        self.pause(Delay::Short).await;

        self.state.announce("Dealing starting hands...");
        let hands = self.state.hand_zones();
        self.state
            .zones
            .deal_to(Zone::DrawPile, &hands, STARTING_HAND_SIZE)?;
        self.pause(Delay::Short).await;

        self.state.announce("Filling the Shop");
        let exposed = self.state.zones.draw_into(Zone::DrawPile, Zone::Shop, SHOP_SIZE);
        self.pause(Delay::Short).await;

        self.state.clear_message();
        debug!(
            seed = self.state.rng.seed(),
            shop = exposed,
            draw_pile = self.state.zones.len(Zone::DrawPile),
            "setup complete"
        );
        Ok(())
    }
}
