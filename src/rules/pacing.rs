//! Presentation pacing between game steps.
//!
//! Delays exist so a human can follow the cards moving. They never affect
//! game state, so headless runs use `NoDelay`.

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

/// How long to pause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delay {
    /// Between individual card moves.
    Beat,
    /// After a completed step (setup stage, discard).
    Short,
    /// After announcing a player's final hand.
    Long,
}

/// Source of pauses. Hosts with a timer implement this.
pub trait Pacer {
    fn pause(&self, delay: Delay) -> LocalBoxFuture<'static, ()>;
}

/// Pacer that never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&self, _delay: Delay) -> LocalBoxFuture<'static, ()> {
        future::ready(()).boxed_local()
    }
}
