//! Hand ranking capability.
//!
//! The engine does not rank poker hands itself. Hosts inject a
//! `HandEvaluator`; scoring only needs a total order over its rank values
//! and the cards that make up each best hand.

use std::cmp::Ordering;
use std::fmt::Display;

use smallvec::SmallVec;

use crate::core::Card;

/// The best hand a player can make from their cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestHand<R> {
    /// Opaque strength, ordered by `HandEvaluator::compare`.
    pub rank: R,
    /// Cards forming the hand. Must be a subset of the evaluated cards.
    pub cards: SmallVec<[Card; 5]>,
}

impl<R> BestHand<R> {
    pub fn new(rank: R, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            rank,
            cards: cards.into_iter().collect(),
        }
    }
}

/// Injected poker hand evaluator.
///
/// `compare` must be a total order; equal ranks are allowed.
pub trait HandEvaluator {
    /// Rank value, displayed in the scoring announcement ("has a Flush!").
    type Rank: Display;

    /// Best hand among `cards`.
    fn best_hand(&self, cards: &[Card]) -> BestHand<Self::Rank>;

    /// Order two ranks, weaker first.
    fn compare(&self, a: &Self::Rank, b: &Self::Rank) -> Ordering;
}

impl<T: HandEvaluator + ?Sized> HandEvaluator for &T {
    type Rank = T::Rank;

    fn best_hand(&self, cards: &[Card]) -> BestHand<Self::Rank> {
        (**self).best_hand(cards)
    }

    fn compare(&self, a: &Self::Rank, b: &Self::Rank) -> Ordering {
        (**self).compare(a, b)
    }
}
