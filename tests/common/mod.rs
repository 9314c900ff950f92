//! Shared harness for integration tests.
//!
//! `AutoClicker` stands in for the human at the table: each time the engine
//! waits for input it looks at the open offers and answers with a strategy.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use rust_shopdraw::choice::ChoiceResolver;
use rust_shopdraw::core::{Card, GameConfig};
use rust_shopdraw::prompt::{Click, OfferView, PromptBoard, Target};
use rust_shopdraw::rules::{BestHand, Game, HandEvaluator};

/// Click stream answering open offers with a strategy.
///
/// Ends (yields `None`) when the strategy has no answer or the click budget
/// runs out.
pub struct AutoClicker<F> {
    board: PromptBoard,
    strategy: F,
    budget: Option<usize>,
    clicks: usize,
}

impl<F> AutoClicker<F>
where
    F: FnMut(&[OfferView]) -> Option<Click> + Unpin,
{
    pub fn new(board: PromptBoard, strategy: F) -> Self {
        Self {
            board,
            strategy,
            budget: None,
            clicks: 0,
        }
    }

    /// Stop after `budget` clicks.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }
}

impl<F> Stream for AutoClicker<F>
where
    F: FnMut(&[OfferView]) -> Option<Click> + Unpin,
{
    type Item = Click;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Click>> {
        let this = &mut *self;
        if this.budget.is_some_and(|budget| this.clicks >= budget) {
            return Poll::Ready(None);
        }

        let offers = this.board.offers();
        let click = (this.strategy)(&offers);
        if click.is_some() {
            this.clicks += 1;
        }
        Poll::Ready(click)
    }
}

fn is_hand_offer(offer: &OfferView) -> bool {
    offer.message.starts_with("Select")
}

fn is_shop_offer(offer: &OfferView) -> bool {
    offer.message == "Click on any card in the Shop"
}

fn first_target(offer: &OfferView) -> Option<Click> {
    offer.targets.first().map(|&target| Click::new(offer.player, target))
}

/// Strategy: select a card, change the selection `changes` more times,
/// confirm, then draw from the shop or the draw pile.
pub fn strategy(changes: usize, prefer_shop: bool) -> impl FnMut(&[OfferView]) -> Option<Click> + Unpin {
    let mut selections = 0;
    move |offers: &[OfferView]| {
        if let Some(confirm) = offers.iter().find(|o| o.accepts(Target::DiscardButton)) {
            if selections > changes {
                selections = 0;
                return Some(Click::new(confirm.player, Target::DiscardButton));
            }
        }

        if let Some(hand) = offers.iter().find(|o| is_hand_offer(o)) {
            selections += 1;
            return first_target(hand);
        }

        let shop = offers.iter().find(|o| is_shop_offer(o));
        let pile = offers.iter().find(|o| o.accepts(Target::DrawPile));
        let (first, second) = if prefer_shop { (shop, pile) } else { (pile, shop) };
        match first.or(second) {
            Some(offer) if offer.accepts(Target::DrawPile) => {
                Some(Click::new(offer.player, Target::DrawPile))
            }
            Some(offer) => first_target(offer),
            None => None,
        }
    }
}

/// Select the first card, confirm, draw blind.
pub fn draw_pile_strategy() -> impl FnMut(&[OfferView]) -> Option<Click> + Unpin {
    strategy(0, false)
}

/// Select the first card, confirm, take the first shop card.
pub fn shop_strategy() -> impl FnMut(&[OfferView]) -> Option<Click> + Unpin {
    strategy(0, true)
}

/// Ranks a hand by the sum of its card values.
pub struct RankSum;

impl HandEvaluator for RankSum {
    type Rank = u32;

    fn best_hand(&self, cards: &[Card]) -> BestHand<u32> {
        let mut best: Vec<Card> = cards.to_vec();
        best.sort_unstable_by(|a, b| b.cmp(a));
        best.truncate(5);
        let rank = best.iter().map(|c| u32::from(c.rank.value())).sum();
        BestHand::new(rank, best)
    }

    fn compare(&self, a: &u32, b: &u32) -> Ordering {
        a.cmp(b)
    }
}

/// Ranks a hand by its single highest card.
pub struct HighCard;

impl HandEvaluator for HighCard {
    type Rank = Card;

    fn best_hand(&self, cards: &[Card]) -> BestHand<Card> {
        let best = cards.iter().copied().max().unwrap_or(Card::new(
            rust_shopdraw::core::Rank::Two,
            rust_shopdraw::core::Suit::Clubs,
        ));
        BestHand::new(best, [best])
    }

    fn compare(&self, a: &Card, b: &Card) -> Ordering {
        a.rank.cmp(&b.rank)
    }
}

pub fn card(s: &str) -> Card {
    s.parse().unwrap()
}

/// A game driven by an `AutoClicker` running `strategy`.
pub fn auto_game<E, F>(
    config: GameConfig,
    evaluator: E,
    strategy: F,
) -> Game<E, AutoClicker<F>>
where
    E: HandEvaluator,
    F: FnMut(&[OfferView]) -> Option<Click> + Unpin,
{
    let board = PromptBoard::new();
    let clicker = AutoClicker::new(board.clone(), strategy);
    Game::new(config, evaluator, ChoiceResolver::new(board, clicker)).unwrap()
}
