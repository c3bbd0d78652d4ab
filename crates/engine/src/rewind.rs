//! Full rewind - undo every fold, most recent first
//!
//! A rewind is a chain of unfold transitions. Only one step is pending at a
//! time; settling a step plans the next one and hands it back in
//! [`Settlement::next`](crate::Settlement::next).

use tracing::{debug, info, warn};

use crate::controller::{LevelController, NoOpReason};
use crate::transition::{Transition, TransitionKind, TransitionSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewindOutcome {
    Started(Transition),
    NoOp(NoOpReason),
}

impl LevelController {
    /// Start undoing every fold. Ignored while busy or once the level is won.
    pub fn request_full_rewind(&mut self) -> RewindOutcome {
        if self.is_completed() {
            return RewindOutcome::NoOp(NoOpReason::LevelCompleted);
        }
        if self.is_busy() {
            return RewindOutcome::NoOp(NoOpReason::Busy);
        }
        if self.level.rewind_stack().is_empty() {
            return RewindOutcome::NoOp(NoOpReason::NothingToRewind);
        }

        match self.plan_rewind_step() {
            Some(t) => {
                info!(folds = self.level.rewind_stack().len(), "full rewind started");
                self.rewinding = true;
                RewindOutcome::Started(t)
            }
            None => RewindOutcome::NoOp(NoOpReason::NoMove),
        }
    }

    /// Run a whole rewind synchronously. Returns the number of unfolds.
    pub fn run_full_rewind(&mut self) -> usize {
        let RewindOutcome::Started(mut step) = self.request_full_rewind() else {
            return 0;
        };

        let mut steps = 0;
        while let Ok(settlement) = self.complete(step.token) {
            steps += 1;
            match settlement.next {
                Some(next) => step = next,
                None => break,
            }
        }
        steps
    }

    /// Open the unfold of the most recent fold still on the rewind stack.
    ///
    /// The candidate is searched on the parent of that fold in
    /// [`Direction::PRIORITY`](crate::types::Direction::PRIORITY) order.
    /// Returns `None` when the stack is empty or no candidate exists.
    pub(crate) fn plan_rewind_step(&mut self) -> Option<Transition> {
        let &tail = self.level.rewind_stack().last()?;
        let parent = self
            .level
            .block(tail)
            .parent()
            .unwrap_or_else(|| panic!("rewind stack holds unfolded block {}", tail));

        let Some((child, direction)) = self.level.find_rewind_candidate(parent) else {
            warn!(%tail, %parent, "no unfold candidate, rewind halted");
            return None;
        };
        debug_assert_eq!(child, tail, "rewind candidate is not the latest fold");
        debug!(%parent, %child, dir = direction.as_str(), "rewind step");

        Some(self.open(
            TransitionKind::Unfold { parent, child },
            direction,
            TransitionSource::Rewind,
        ))
    }
}
