//! Action prompts: what a player may click, and the clicks they make.
//!
//! A prompt offers one player a set of clickable `Target`s. The display
//! layer reads open offers from the `PromptBoard` and feeds `Click`s back;
//! the board routes each click to the oldest open offer that accepts it.
//!
//! ## Key Types
//!
//! - `Target`: something on the table a player can click
//! - `Click`: one player clicking one target
//! - `PromptBoard`: open offers and click routing
//! - `Prompt`: future resolving to the clicked target

mod board;

pub use board::{OfferView, Prompt, PromptBoard};

use serde::{Deserialize, Serialize};

use crate::core::{Card, PlayerId};

/// A clickable thing on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A specific card (in a hand or the shop).
    Card(Card),
    /// The face-down draw pile.
    DrawPile,
    /// The "Discard" button shown while a card is selected.
    DiscardButton,
}

impl Target {
    /// The card, if this target is one.
    #[must_use]
    pub fn card(self) -> Option<Card> {
        match self {
            Target::Card(card) => Some(card),
            Target::DrawPile | Target::DiscardButton => None,
        }
    }
}

impl From<Card> for Target {
    fn from(card: Card) -> Self {
        Target::Card(card)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Card(card) => write!(f, "{card}"),
            Target::DrawPile => f.write_str("Draw Pile"),
            Target::DiscardButton => f.write_str("Discard"),
        }
    }
}

/// A player clicking a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Click {
    pub player: PlayerId,
    pub target: Target,
}

impl Click {
    #[must_use]
    pub fn new(player: PlayerId, target: impl Into<Target>) -> Self {
        Self {
            player,
            target: target.into(),
        }
    }
}
