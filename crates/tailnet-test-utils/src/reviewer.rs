//! [`ScriptedReviewer`] for protocol tests.

use std::collections::VecDeque;

use tailnet_core::{ChangePlan, Error, Result, Reviewer};

/// A [`Reviewer`] that records previews and answers prompts from a script.
///
/// When the script runs dry, `confirm` returns an interaction error so a
/// test notices an unexpected prompt.
#[derive(Debug, Default)]
pub struct ScriptedReviewer {
    answers: VecDeque<bool>,
    /// Plans passed to `preview`, in order.
    pub previews: Vec<ChangePlan>,
    /// Number of times `confirm` was called.
    pub prompts: usize,
}

impl ScriptedReviewer {
    /// A reviewer that is never expected to be asked.
    pub fn silent() -> Self {
        Self::default()
    }

    /// A reviewer that answers with `answers`, in order.
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Reviewer for ScriptedReviewer {
    fn preview(&mut self, plan: &ChangePlan) {
        self.previews.push(plan.clone());
    }

    fn confirm(&mut self, _plan: &ChangePlan) -> Result<bool> {
        self.prompts += 1;
        self.answers
            .pop_front()
            .ok_or_else(|| Error::interaction("unexpected confirmation prompt"))
    }
}
