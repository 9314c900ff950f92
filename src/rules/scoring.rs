//! Final scoring pass.
//!
//! Players are ordered weakest hand first with a stable sort, so equal ranks
//! keep seating order. Placements run 1..=n along that order. Each player's
//! best hand is shown in the shop while it is announced; at the end every
//! card is back in the discard pile.

use futures::Stream;
use tracing::debug;

use super::engine::Game;
use super::eval::{BestHand, HandEvaluator};
use super::pacing::{Delay, Pacer};
use crate::core::{Card, EngineError, GameState, PlayerId, Result, TurnPhase, Zone};
use crate::prompt::Click;

/// A player paired with the best hand from their current cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoringEntry<R> {
    pub player: PlayerId,
    pub hand: BestHand<R>,
}

/// Evaluate every player's hand, in seating order.
pub fn score_entries<E>(evaluator: &E, state: &GameState) -> Vec<ScoringEntry<E::Rank>>
where
    E: HandEvaluator + ?Sized,
{
    state
        .player_ids()
        .map(|player| {
            let cards: Vec<Card> = state.zones.iter(Zone::Hand(player)).collect();
            ScoringEntry {
                player,
                hand: evaluator.best_hand(&cards),
            }
        })
        .collect()
}

/// Sort entries weakest first. Stable: ties keep their relative order.
pub fn rank_entries<E>(evaluator: &E, entries: &mut [ScoringEntry<E::Rank>])
where
    E: HandEvaluator + ?Sized,
{
    entries.sort_by(|a, b| evaluator.compare(&a.hand.rank, &b.hand.rank));
}

impl<E, S, P> Game<E, S, P>
where
    E: HandEvaluator,
    S: Stream<Item = Click> + Unpin,
    P: Pacer,
{
    /// Rank every player, assign placements and return all cards to the
    /// discard pile.
    ///
    /// Placements are assigned once: fails with `AlreadyScored` if scoring
    /// has already started.
    pub async fn final_scoring(&mut self) -> Result<()> {
        if matches!(self.state.phase(), TurnPhase::FinalScoring | TurnPhase::Done) {
            return Err(EngineError::AlreadyScored);
        }
        self.state.set_phase(TurnPhase::FinalScoring);

        let mut entries = score_entries(&self.evaluator, &self.state);
        rank_entries(&self.evaluator, &mut entries);

        self.state.announce("Final scoring!");
        self.pause(Delay::Short).await;

        for (placement, entry) in (1u32..).zip(entries) {
            let player = entry.player;
            let hand = Zone::Hand(player);

            self.state.zones.move_all(Zone::Shop, Zone::DiscardPile);
            self.pause(Delay::Beat).await;

            self.state.set_final_score(player, placement);
            debug!(%player, placement, rank = %entry.hand.rank, "placed");

            let name = self.state.player_name(player);
            self.state.announce(format!("{name} has a {}!", entry.hand.rank));
            for &card in &entry.hand.cards {
                self.state.zones.move_one(hand, Zone::Shop, card)?;
            }
            self.state.zones.move_all(hand, Zone::DiscardPile);
            self.pause(Delay::Long).await;
        }

        self.state.zones.move_all(Zone::Shop, Zone::DiscardPile);
        self.pause(Delay::Beat).await;

        self.state.announce("Thanks for playing!");
        self.state.set_phase(TurnPhase::Done);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;
    use crate::core::{GameConfig, Rank};

    /// Scores a hand by its highest card.
    struct HighCard;

    impl HandEvaluator for HighCard {
        type Rank = Rank;

        fn best_hand(&self, cards: &[Card]) -> BestHand<Rank> {
            let best = cards.iter().copied().max();
            BestHand::new(best.map_or(Rank::Two, |c| c.rank), best)
        }

        fn compare(&self, a: &Rank, b: &Rank) -> Ordering {
            a.cmp(b)
        }
    }

    fn deal(state: &mut GameState, player: u8, cards: &[&str]) {
        for s in cards {
            state
                .zones
                .move_one(Zone::DiscardPile, Zone::Hand(PlayerId::new(player)), s.parse().unwrap())
                .unwrap();
        }
    }

    #[test]
    fn test_rank_entries_weakest_first() {
        let mut state = GameState::new(GameConfig::new(3, 0)).unwrap();
        deal(&mut state, 0, &["Ah", "2c"]);
        deal(&mut state, 1, &["9d", "3c"]);
        deal(&mut state, 2, &["Kd", "4c"]);

        let mut entries = score_entries(&HighCard, &state);
        rank_entries(&HighCard, &mut entries);

        let order: Vec<u8> = entries.iter().map(|e| e.player.0).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(entries[2].hand.cards.as_slice(), &["Ah".parse::<Card>().unwrap()]);
    }

    #[test]
    fn test_ties_keep_seat_order() {
        let mut state = GameState::new(GameConfig::new(3, 0)).unwrap();
        deal(&mut state, 0, &["Qh"]);
        deal(&mut state, 1, &["Qd"]);
        deal(&mut state, 2, &["Qc"]);

        let mut entries = score_entries(&HighCard, &state);
        rank_entries(&HighCard, &mut entries);

        let order: Vec<u8> = entries.iter().map(|e| e.player.0).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
