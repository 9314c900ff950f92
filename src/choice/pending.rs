//! Candidate actions for a race.

use crate::core::Result;
use crate::prompt::{Prompt, Target};

type Commit<'a, C, R> = Box<dyn FnOnce(&mut C, Target) -> Result<R> + 'a>;

/// One candidate in a race: a prompt to wait on and the effect to apply if
/// it wins.
///
/// Waiting on the prompt has no effect on the game. The commit runs only
/// for the winner, after every other candidate has been dropped.
pub struct PendingAction<'a, C, R> {
    name: &'static str,
    prompt: Prompt,
    commit: Commit<'a, C, R>,
}

impl<'a, C, R> PendingAction<'a, C, R> {
    /// Pair a prompt with the effect committed when its target is clicked.
    pub fn new(
        name: &'static str,
        prompt: Prompt,
        commit: impl FnOnce(&mut C, Target) -> Result<R> + 'a,
    ) -> Self {
        Self {
            name,
            prompt,
            commit: Box::new(commit),
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn into_parts(self) -> (&'static str, Prompt, Commit<'a, C, R>) {
        (self.name, self.prompt, self.commit)
    }
}

impl<C, R> std::fmt::Debug for PendingAction<'_, C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAction")
            .field("name", &self.name)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}
