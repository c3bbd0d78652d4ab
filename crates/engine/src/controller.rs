//! Level controller - one fold or unfold at a time
//!
//! The controller owns the level and a single busy slot. A swipe that finds
//! a fold or unfold opens a [`Transition`] and makes the controller busy;
//! the level is mutated only when that transition settles, either through
//! [`LevelController::complete`] or through [`LevelController::tick`].

use tracing::{debug, info, warn};

use crate::config::{CompletionMode, EngineConfig};
use crate::core::{FoldRecord, Level, LevelSnapshot, UnfoldRecord};
use crate::transition::{Transition, TransitionKind, TransitionSource, TransitionToken};
use crate::types::{BlockId, Direction, GridPos};

/// Why a request left the level untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// A transition is still playing.
    Busy,
    /// The level has been won; input stays disabled until the next level.
    LevelCompleted,
    /// The swiped block is folded away (or no block is at the swiped cell).
    NotInteractive,
    /// Nothing to fold onto and nothing to unfold in that direction.
    NoMove,
    /// The rewind stack is empty.
    NothingToRewind,
    /// The id does not belong to this level.
    UnknownBlock,
}

impl NoOpReason {
    pub fn as_str(self) -> &'static str {
        match self {
            NoOpReason::Busy => "busy",
            NoOpReason::LevelCompleted => "level_completed",
            NoOpReason::NotInteractive => "not_interactive",
            NoOpReason::NoMove => "no_move",
            NoOpReason::NothingToRewind => "nothing_to_rewind",
            NoOpReason::UnknownBlock => "unknown_block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Fold,
    Unfold,
    NoOp,
}

impl SwipeDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDecision::Fold => "fold",
            SwipeDecision::Unfold => "unfold",
            SwipeDecision::NoOp => "noop",
        }
    }
}

/// What a swipe started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeOutcome {
    Fold(Transition),
    Unfold(Transition),
    NoOp(NoOpReason),
}

impl SwipeOutcome {
    pub fn decision(&self) -> SwipeDecision {
        match self {
            SwipeOutcome::Fold(_) => SwipeDecision::Fold,
            SwipeOutcome::Unfold(_) => SwipeDecision::Unfold,
            SwipeOutcome::NoOp(_) => SwipeDecision::NoOp,
        }
    }

    pub fn transition(&self) -> Option<&Transition> {
        match self {
            SwipeOutcome::Fold(t) | SwipeOutcome::Unfold(t) => Some(t),
            SwipeOutcome::NoOp(_) => None,
        }
    }
}

/// Mutation applied when a transition settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Fold(FoldRecord),
    Unfold(UnfoldRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub token: TransitionToken,
    pub applied: Applied,
    /// Set exactly once per level, on the settlement that won it.
    pub level_completed: bool,
    /// Next rewind step, already pending.
    pub next: Option<Transition>,
    /// Settled by the timeout rather than by a completion signal.
    pub forced: bool,
}

/// Result of a synchronous [`LevelController::process_swipe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeReport {
    pub decision: SwipeDecision,
    pub reason: Option<NoOpReason>,
    pub settlement: Option<Settlement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionError {
    NotBusy,
    StaleToken,
}

impl CompletionError {
    pub fn code(self) -> &'static str {
        match self {
            CompletionError::NotBusy => "not_busy",
            CompletionError::StaleToken => "stale_token",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CompletionError::NotBusy => "no transition is pending",
            CompletionError::StaleToken => "token does not match the pending transition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Transitioning,
}

#[derive(Debug, Clone)]
pub(crate) struct Pending {
    pub(crate) transition: Transition,
    pub(crate) elapsed_ms: u32,
}

/// Explicit context object for one loaded level.
#[derive(Debug, Clone)]
pub struct LevelController {
    pub(crate) level: Level,
    pub(crate) config: EngineConfig,
    pub(crate) pending: Option<Pending>,
    pub(crate) rewinding: bool,
    next_token: u64,
    completed: bool,
}

impl LevelController {
    pub fn new(level: Level, config: EngineConfig) -> Self {
        Self {
            level,
            config,
            pending: None,
            rewinding: false,
            next_token: 1,
            completed: false,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn into_level(self) -> Level {
        self.level
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> EnginePhase {
        if self.pending.is_some() {
            EnginePhase::Transitioning
        } else {
            EnginePhase::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_rewinding(&self) -> bool {
        self.rewinding
    }

    pub fn is_level_won(&self) -> bool {
        self.level.is_won()
    }

    /// The win has been reported and swipes are disabled.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        self.level.snapshot()
    }

    /// Decide what a swipe on `origin` does and start its transition.
    pub fn begin_swipe(&mut self, origin: BlockId, direction: Direction) -> SwipeOutcome {
        if self.completed {
            return SwipeOutcome::NoOp(NoOpReason::LevelCompleted);
        }
        if self.is_busy() {
            return SwipeOutcome::NoOp(NoOpReason::Busy);
        }
        let Some(block) = self.level.get(origin) else {
            return SwipeOutcome::NoOp(NoOpReason::UnknownBlock);
        };
        if !block.collider_enabled() {
            return SwipeOutcome::NoOp(NoOpReason::NotInteractive);
        }

        if let Some(target) = self.level.find_fold_target(origin, direction) {
            if self.level.has_at_most_one_neighbor(origin) {
                debug!(block = %origin, %target, dir = direction.as_str(), "fold");
                let t = self.open(
                    TransitionKind::Fold {
                        block: origin,
                        target,
                    },
                    direction,
                    TransitionSource::Swipe,
                );
                return SwipeOutcome::Fold(t);
            }
        }

        if let Some(child) = self.level.find_unfold_candidate(origin, direction) {
            debug!(parent = %origin, %child, dir = direction.as_str(), "unfold");
            let t = self.open(
                TransitionKind::Unfold {
                    parent: origin,
                    child,
                },
                direction,
                TransitionSource::Swipe,
            );
            return SwipeOutcome::Unfold(t);
        }

        SwipeOutcome::NoOp(NoOpReason::NoMove)
    }

    /// Swipe starting on grid cell `pos`; only the stack root there is hit.
    pub fn begin_swipe_at(&mut self, pos: GridPos, direction: Direction) -> SwipeOutcome {
        match self.level.root_at(pos) {
            Some(id) => self.begin_swipe(id, direction),
            None if self.completed => SwipeOutcome::NoOp(NoOpReason::LevelCompleted),
            None if self.is_busy() => SwipeOutcome::NoOp(NoOpReason::Busy),
            None => SwipeOutcome::NoOp(NoOpReason::NotInteractive),
        }
    }

    /// Completion callback for the pending transition.
    pub fn complete(&mut self, token: TransitionToken) -> Result<Settlement, CompletionError> {
        let Some(pending) = self.pending.take() else {
            return Err(CompletionError::NotBusy);
        };
        if pending.transition.token != token {
            self.pending = Some(pending);
            return Err(CompletionError::StaleToken);
        }
        Ok(self.settle(pending.transition, false))
    }

    /// Advance the pending transition's clock.
    ///
    /// In [`CompletionMode::Clock`] the transition settles once its duration
    /// has elapsed. In [`CompletionMode::External`] it settles only after the
    /// completion timeout on top of that.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<Settlement> {
        let pending = self.pending.as_mut()?;
        pending.elapsed_ms = pending.elapsed_ms.saturating_add(elapsed_ms);

        let due = pending.transition.duration_ms();
        let forced = self.config.completion == CompletionMode::External;
        let deadline = if forced {
            due.saturating_add(self.config.completion_timeout_ms)
        } else {
            due
        };
        if pending.elapsed_ms < deadline {
            return None;
        }

        let pending = self.pending.take()?;
        if forced {
            warn!(
                token = pending.transition.token.0,
                elapsed_ms = pending.elapsed_ms,
                "completion signal missing, settling transition"
            );
        }
        Some(self.settle(pending.transition, forced))
    }

    /// Begin and immediately settle a swipe.
    pub fn process_swipe(&mut self, origin: BlockId, direction: Direction) -> SwipeReport {
        let outcome = self.begin_swipe(origin, direction);
        self.finish_immediately(outcome)
    }

    pub fn process_swipe_at(&mut self, pos: GridPos, direction: Direction) -> SwipeReport {
        let outcome = self.begin_swipe_at(pos, direction);
        self.finish_immediately(outcome)
    }

    fn finish_immediately(&mut self, outcome: SwipeOutcome) -> SwipeReport {
        let decision = outcome.decision();
        match outcome {
            SwipeOutcome::NoOp(reason) => SwipeReport {
                decision,
                reason: Some(reason),
                settlement: None,
            },
            SwipeOutcome::Fold(t) | SwipeOutcome::Unfold(t) => SwipeReport {
                decision,
                reason: None,
                settlement: self.complete(t.token).ok(),
            },
        }
    }

    pub(crate) fn open(
        &mut self,
        kind: TransitionKind,
        direction: Direction,
        source: TransitionSource,
    ) -> Transition {
        let token = TransitionToken(self.next_token);
        self.next_token += 1;

        let rewind = source == TransitionSource::Rewind;
        let transition = match kind {
            TransitionKind::Fold { block, target } => Transition {
                token,
                kind,
                source,
                direction,
                moving: self.level.subtree(block),
                lift: self.level.fold_lift(block, target),
                rotation_ms: self.config.fold_rotation_ms,
                settle_ms: 0,
            },
            TransitionKind::Unfold { child, .. } => Transition {
                token,
                kind,
                source,
                direction,
                moving: self.level.subtree(child),
                lift: 0,
                rotation_ms: if rewind {
                    self.config.rewind_rotation_ms
                } else {
                    self.config.unfold_rotation_ms
                },
                settle_ms: if rewind {
                    0
                } else {
                    self.config.unfold_settle_ms
                },
            },
        };

        self.pending = Some(Pending {
            transition: transition.clone(),
            elapsed_ms: 0,
        });
        transition
    }

    fn settle(&mut self, transition: Transition, forced: bool) -> Settlement {
        let applied = match transition.kind {
            TransitionKind::Fold { block, target } => {
                Applied::Fold(self.level.commit_fold(block, target))
            }
            TransitionKind::Unfold { parent, child } => {
                Applied::Unfold(self.level.commit_unfold(parent, child))
            }
        };

        let mut level_completed = false;
        let mut next = None;
        match transition.source {
            TransitionSource::Swipe => level_completed = self.check_win(),
            TransitionSource::Rewind => {
                next = self.plan_rewind_step();
                if next.is_none() {
                    self.rewinding = false;
                }
            }
        }

        Settlement {
            token: transition.token,
            applied,
            level_completed,
            next,
            forced,
        }
    }

    fn check_win(&mut self) -> bool {
        if self.completed || !self.level.is_won() {
            return false;
        }
        self.completed = true;
        info!(blocks = self.level.len(), "level completed");
        true
    }
}
