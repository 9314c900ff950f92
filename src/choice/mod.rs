//! Concurrent choice resolution.
//!
//! When a player has several things they could do next (pick a different
//! card, confirm the discard, take from the shop, draw blind), each option
//! is a `PendingAction`: a prompt plus the effect to commit if that prompt
//! is answered first. The `ChoiceResolver` races them and commits exactly
//! one.
//!
//! ## Example Usage
//!
//! ```
//! use futures::executor::block_on;
//! use futures::stream;
//! use rust_shopdraw::choice::{ChoiceResolver, PendingAction};
//! use rust_shopdraw::core::PlayerId;
//! use rust_shopdraw::prompt::{Click, PromptBoard, Target};
//!
//! let p0 = PlayerId::new(0);
//! let board = PromptBoard::new();
//! let clicks = stream::iter([Click::new(p0, Target::DiscardButton)]);
//! let mut resolver = ChoiceResolver::new(board, clicks);
//!
//! let mut log: Vec<String> = Vec::new();
//! let winner = block_on(resolver.race(&mut log, p0, |_, board| {
//!     vec![
//!         PendingAction::new("draw", board.click(p0, Target::DrawPile, "Draw"), |log: &mut Vec<String>, _| {
//!             log.push("draw".into());
//!             Ok("draw")
//!         }),
//!         PendingAction::new("discard", board.click(p0, Target::DiscardButton, "Discard"), |log: &mut Vec<String>, _| {
//!             log.push("discard".into());
//!             Ok("discard")
//!         }),
//!     ]
//! }));
//!
//! assert_eq!(winner, Ok("discard"));
//! assert_eq!(log, ["discard"]);
//! ```

mod pending;
mod resolver;

pub use pending::PendingAction;
pub use resolver::ChoiceResolver;
