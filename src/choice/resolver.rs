//! Race resolution over one player's candidate actions.

use std::ops::ControlFlow;

use futures::future::{select, select_all, Either};
use futures::{Stream, StreamExt};
use tracing::{debug, trace, warn};

use super::PendingAction;
use crate::core::{EngineError, PlayerId, Result};
use crate::prompt::{Click, PromptBoard};

/// Races candidate actions for one player and commits the first to resolve.
///
/// The resolver owns the click input. While a race is open it pulls clicks
/// from the input and routes them through the board; if the input ends
/// before any candidate resolves, the race fails with `ActionAborted`.
///
/// Races take `&mut self`, so two races never overlap.
pub struct ChoiceResolver<S> {
    board: PromptBoard,
    input: S,
    races: u64,
}

impl<S> ChoiceResolver<S>
where
    S: Stream<Item = Click> + Unpin,
{
    /// Create a resolver routing clicks from `input` through `board`.
    pub fn new(board: PromptBoard, input: S) -> Self {
        Self {
            board,
            input,
            races: 0,
        }
    }

    /// The board candidates post their offers on.
    #[must_use]
    pub fn board(&self) -> &PromptBoard {
        &self.board
    }

    /// Races started so far.
    #[must_use]
    pub fn races(&self) -> u64 {
        self.races
    }

    /// Run one race.
    ///
    /// `factory` builds the candidates from the current context; their
    /// offers open immediately. The first candidate whose prompt resolves
    /// wins. All other candidates are dropped and the player's offers
    /// withdrawn before the winner's commit runs against `ctx`, so at most
    /// one commit happens per race. When several prompts are ready at the
    /// same poll, the earliest candidate wins.
    pub async fn race<'a, C, R, F>(&mut self, ctx: &mut C, player: PlayerId, factory: F) -> Result<R>
    where
        F: FnOnce(&C, &PromptBoard) -> Vec<PendingAction<'a, C, R>>,
    {
        let candidates = factory(ctx, &self.board);
        if candidates.is_empty() {
            return Err(EngineError::NoCandidates { player });
        }
        self.races += 1;

        let mut names = Vec::with_capacity(candidates.len());
        let mut prompts = Vec::with_capacity(candidates.len());
        let mut commits = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let (name, prompt, commit) = candidate.into_parts();
            debug_assert_eq!(prompt.player(), player, "candidate {name} prompts another player");
            names.push(name);
            prompts.push(prompt);
            commits.push(commit);
        }
        trace!(%player, candidates = ?names, "race started");

        let mut race = select_all(prompts);
        let outcome = loop {
            match select(race, self.input.next()).await {
                // Losing prompts are dropped with the rest of this tuple
                Either::Left(((result, index, _), _)) => {
                    break result.map(|target| (index, target));
                }
                Either::Right((Some(click), unfinished)) => {
                    if !self.board.deliver(&click) {
                        debug!(player = %click.player, target = %click.target, "click matched no open offer");
                    }
                    race = unfinished;
                }
                Either::Right((None, _)) => {
                    break Err(EngineError::ActionAborted { player });
                }
            }
        };
        self.board.withdraw(player);

        if let Err(err) = &outcome {
            warn!(%player, %err, "race aborted");
        }
        let (index, target) = outcome?;
        debug!(%player, winner = names[index], %target, "race resolved");

        let commit = commits.swap_remove(index);
        commit(ctx, target)
    }

    /// Race repeatedly until a winner breaks the loop.
    ///
    /// `factory` is re-invoked before every race, so the candidates can
    /// follow what earlier winners changed.
    pub async fn race_until<'a, C, B, F>(&mut self, ctx: &mut C, player: PlayerId, mut factory: F) -> Result<B>
    where
        F: FnMut(&C, &PromptBoard) -> Vec<PendingAction<'a, C, ControlFlow<B>>>,
    {
        loop {
            if let ControlFlow::Break(value) = self.race(ctx, player, &mut factory).await? {
                return Ok(value);
            }
        }
    }
}

impl<S> std::fmt::Debug for ChoiceResolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoiceResolver")
            .field("board", &self.board)
            .field("races", &self.races)
            .finish_non_exhaustive()
    }
}
