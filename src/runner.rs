//! Headless game loop state.
//!
//! [`Runner`] owns the campaign and the controller of the level being
//! played. Commands come in through [`Runner::apply`], time advances through
//! [`Runner::tick`], and a won level is replaced by the next one as soon as
//! its winning transition settles. The final state of the won level is kept
//! until [`Runner::take_won_observation`] picks it up.

use tracing::debug;

use crate::adapter::{build_observation, ClientCommand, ObservationMessage};
use crate::campaign::{Campaign, CampaignError, ProgressStore};
use crate::core::LevelSnapshot;
use crate::engine::{
    LevelController, NoOpReason, RewindOutcome, Settlement, SwipeDecision, SwipeOutcome,
};

/// What kind of ack an applied command gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Fold,
    Unfold,
    NoOp,
    Rewind,
    Snapshot,
}

impl ReplyOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyOutcome::Fold => "fold",
            ReplyOutcome::Unfold => "unfold",
            ReplyOutcome::NoOp => "noop",
            ReplyOutcome::Rewind => "rewind",
            ReplyOutcome::Snapshot => "snapshot",
        }
    }
}

impl From<SwipeDecision> for ReplyOutcome {
    fn from(decision: SwipeDecision) -> Self {
        match decision {
            SwipeDecision::Fold => ReplyOutcome::Fold,
            SwipeDecision::Unfold => ReplyOutcome::Unfold,
            SwipeDecision::NoOp => ReplyOutcome::NoOp,
        }
    }
}

/// What an applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub outcome: ReplyOutcome,
    pub reason: Option<NoOpReason>,
}

impl Reply {
    fn new(outcome: ReplyOutcome) -> Self {
        Self {
            outcome,
            reason: None,
        }
    }

    fn noop(reason: NoOpReason) -> Self {
        Self {
            outcome: ReplyOutcome::NoOp,
            reason: Some(reason),
        }
    }

    /// The command started a transition.
    pub fn started(&self) -> bool {
        matches!(
            self.outcome,
            ReplyOutcome::Fold | ReplyOutcome::Unfold | ReplyOutcome::Rewind
        )
    }
}

/// Last state of a level that was just won.
#[derive(Debug, Clone)]
struct WonLevel {
    snapshot: LevelSnapshot,
    index: usize,
    name: String,
}

pub struct Runner<S: ProgressStore> {
    campaign: Campaign<S>,
    controller: LevelController,
    levels_completed: usize,
    won: Option<WonLevel>,
}

impl<S: ProgressStore> Runner<S> {
    pub fn new(mut campaign: Campaign<S>) -> Result<Self, CampaignError> {
        let controller = campaign.load_level()?;
        Ok(Self {
            campaign,
            controller,
            levels_completed: 0,
            won: None,
        })
    }

    pub fn controller(&self) -> &LevelController {
        &self.controller
    }

    pub fn campaign(&self) -> &Campaign<S> {
        &self.campaign
    }

    pub fn level_index(&self) -> usize {
        self.campaign.current_index()
    }

    /// Levels won since this runner started.
    pub fn levels_completed(&self) -> usize {
        self.levels_completed
    }

    pub fn apply(&mut self, command: ClientCommand) -> Reply {
        let reply = match command {
            ClientCommand::Swipe { pos, direction } => {
                match self.controller.begin_swipe_at(pos, direction) {
                    SwipeOutcome::NoOp(reason) => Reply::noop(reason),
                    started => Reply::new(started.decision().into()),
                }
            }
            ClientCommand::Rewind => match self.controller.request_full_rewind() {
                RewindOutcome::Started(_) => Reply::new(ReplyOutcome::Rewind),
                RewindOutcome::NoOp(reason) => Reply::noop(reason),
            },
            ClientCommand::Snapshot => Reply::new(ReplyOutcome::Snapshot),
        };
        debug!(?command, outcome = reply.outcome.as_str(), reason = ?reply.reason, "command applied");
        reply
    }

    /// Advance the pending transition.
    ///
    /// When the settlement wins the level, the won state is stashed, the
    /// campaign moves on and the next level is loaded before this returns.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Option<Settlement>, CampaignError> {
        let Some(settlement) = self.controller.tick(elapsed_ms) else {
            return Ok(None);
        };
        if settlement.level_completed {
            self.levels_completed += 1;
            self.won = Some(WonLevel {
                snapshot: self.controller.snapshot(),
                index: self.campaign.current_index(),
                name: self.campaign.current_def().name.clone(),
            });
            self.controller = self.campaign.level_completed()?;
        }
        Ok(Some(settlement))
    }

    /// Observation of the level won by the last winning settlement, once.
    pub fn take_won_observation(&mut self, seq: u64) -> Option<ObservationMessage> {
        let won = self.won.take()?;
        Some(build_observation(
            &won.snapshot,
            seq,
            won.index,
            &won.name,
            false,
            false,
            self.levels_completed as u64,
        ))
    }

    pub fn observation(&self, seq: u64) -> ObservationMessage {
        build_observation(
            &self.controller.snapshot(),
            seq,
            self.campaign.current_index(),
            &self.campaign.current_def().name,
            self.controller.is_busy(),
            self.controller.is_rewinding(),
            self.levels_completed as u64,
        )
    }
}
