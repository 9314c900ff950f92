//! Open offers and click routing.
//!
//! Each offer owns the sending half of a oneshot channel; the `Prompt`
//! returned to the caller owns the receiving half. Delivering a click sends
//! on the matching offer and removes it. Withdrawing offers drops their
//! senders, which resolves any prompt still waiting with `ActionAborted`.
//!
//! The board is shared with `Rc` and is meant for the single-threaded
//! executor the engine runs on.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::FutureExt;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::trace;

use super::{Click, Target};
use crate::core::{EngineError, PlayerId, Result};

struct Offer {
    player: PlayerId,
    targets: SmallVec<[Target; 8]>,
    message: String,
    reply: oneshot::Sender<Target>,
}

/// Read-only view of an open offer, for the display layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OfferView {
    pub player: PlayerId,
    pub targets: Vec<Target>,
    pub message: String,
}

impl OfferView {
    #[must_use]
    pub fn accepts(&self, target: Target) -> bool {
        self.targets.contains(&target)
    }
}

/// Shared board of open click offers.
///
/// Cloning the board yields another handle to the same offers.
///
/// ```
/// use futures::executor::block_on;
/// use rust_shopdraw::core::PlayerId;
/// use rust_shopdraw::prompt::{Click, PromptBoard, Target};
///
/// let board = PromptBoard::new();
/// let p0 = PlayerId::new(0);
///
/// let prompt = board.click(p0, Target::DrawPile, "Click on the Draw Pile");
/// assert_eq!(board.offers().len(), 1);
///
/// assert!(board.deliver(&Click::new(p0, Target::DrawPile)));
/// assert_eq!(block_on(prompt), Ok(Target::DrawPile));
/// assert!(board.offers().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct PromptBoard {
    offers: Rc<RefCell<Vec<Offer>>>,
}

impl PromptBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask `player` to click `target`.
    pub fn click(&self, player: PlayerId, target: Target, message: impl Into<String>) -> Prompt {
        self.click_any(player, [target], message)
    }

    /// Ask `player` to click any one of `targets`.
    ///
    /// The offer is open as soon as this returns, before the prompt is
    /// first polled.
    pub fn click_any(
        &self,
        player: PlayerId,
        targets: impl IntoIterator<Item = Target>,
        message: impl Into<String>,
    ) -> Prompt {
        let (reply, receiver) = oneshot::channel();
        let offer = Offer {
            player,
            targets: targets.into_iter().collect(),
            message: message.into(),
            reply,
        };
        trace!(%player, targets = offer.targets.len(), message = %offer.message, "offer opened");
        self.offers.borrow_mut().push(offer);

        Prompt { player, receiver }
    }

    /// Route a click to the oldest open offer for that player accepting the
    /// target.
    ///
    /// Returns `false` if no live offer accepts it; the click is dropped.
    pub fn deliver(&self, click: &Click) -> bool {
        let mut offers = self.offers.borrow_mut();
        offers.retain(|offer| !offer.reply.is_canceled());

        let position = offers
            .iter()
            .position(|offer| offer.player == click.player && offer.targets.contains(&click.target));

        match position {
            Some(index) => offers.remove(index).reply.send(click.target).is_ok(),
            None => false,
        }
    }

    /// Close every open offer for `player`. Returns how many were closed.
    pub fn withdraw(&self, player: PlayerId) -> usize {
        let mut offers = self.offers.borrow_mut();
        let before = offers.len();
        offers.retain(|offer| offer.player != player);
        before - offers.len()
    }

    /// Open offers whose prompts are still waiting, oldest first.
    #[must_use]
    pub fn offers(&self) -> Vec<OfferView> {
        self.offers
            .borrow()
            .iter()
            .filter(|offer| !offer.reply.is_canceled())
            .map(|offer| OfferView {
                player: offer.player,
                targets: offer.targets.to_vec(),
                message: offer.message.clone(),
            })
            .collect()
    }

    /// Whether `player` has any open offer.
    #[must_use]
    pub fn has_offers(&self, player: PlayerId) -> bool {
        self.offers
            .borrow()
            .iter()
            .any(|offer| offer.player == player && !offer.reply.is_canceled())
    }
}

impl std::fmt::Debug for PromptBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptBoard")
            .field("offers", &self.offers())
            .finish()
    }
}

/// A pending click request.
///
/// Resolves to the clicked target, or `ActionAborted` if the offer was
/// withdrawn or the board dropped. Dropping the prompt cancels the offer.
#[must_use = "prompts do nothing unless awaited"]
pub struct Prompt {
    player: PlayerId,
    receiver: oneshot::Receiver<Target>,
}

impl Prompt {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt").field("player", &self.player).finish()
    }
}

impl Future for Prompt {
    type Output = Result<Target>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let player = self.player;
        self.receiver
            .poll_unpin(cx)
            .map(|reply| reply.map_err(|_| EngineError::ActionAborted { player }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn card(s: &str) -> Target {
        Target::Card(s.parse().unwrap())
    }

    #[test]
    fn test_click_any_accepts_only_offered_targets() {
        let board = PromptBoard::new();
        let p0 = PlayerId::new(0);

        let prompt = board.click_any(p0, [card("Ah"), card("Kd")], "Select a card to discard");

        assert!(!board.deliver(&Click::new(p0, card("2c"))));
        assert!(!board.deliver(&Click::new(PlayerId::new(1), card("Ah"))));
        assert!(board.deliver(&Click::new(p0, card("Kd"))));

        assert_eq!(block_on(prompt), Ok(card("Kd")));
    }

    #[test]
    fn test_oldest_matching_offer_wins() {
        let board = PromptBoard::new();
        let p0 = PlayerId::new(0);

        let first = board.click(p0, Target::DrawPile, "first");
        let second = board.click(p0, Target::DrawPile, "second");

        assert!(board.deliver(&Click::new(p0, Target::DrawPile)));
        assert_eq!(block_on(first), Ok(Target::DrawPile));

        let views = board.offers();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].message, "second");
        drop(second);
    }

    #[test]
    fn test_dropped_prompt_cancels_offer() {
        let board = PromptBoard::new();
        let p0 = PlayerId::new(0);

        let prompt = board.click(p0, Target::DiscardButton, "Discard");
        assert!(board.has_offers(p0));

        drop(prompt);
        assert!(!board.has_offers(p0));
        assert!(!board.deliver(&Click::new(p0, Target::DiscardButton)));
    }

    #[test]
    fn test_withdraw_aborts_waiting_prompt() {
        let board = PromptBoard::new();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        let prompt = board.click(p0, Target::DrawPile, "Click on the Draw Pile");
        let other = board.click(p1, Target::DrawPile, "Click on the Draw Pile");

        assert_eq!(board.withdraw(p0), 1);
        assert_eq!(block_on(prompt), Err(EngineError::ActionAborted { player: p0 }));

        // Other players' offers are untouched
        assert!(board.has_offers(p1));
        drop(other);
    }

    #[test]
    fn test_offer_view() {
        let board = PromptBoard::new();
        let p0 = PlayerId::new(0);
        let _prompt = board.click_any(p0, [card("Ah")], "Click on any card in the Shop");

        let view = &board.offers()[0];
        assert_eq!(view.player, p0);
        assert!(view.accepts(card("Ah")));
        assert!(!view.accepts(Target::DrawPile));
    }
}
