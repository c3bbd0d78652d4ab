//! Transaction engine - sequences folds, unfolds and rewinds in time
//!
//! [`LevelController`] is the single owner of a loaded [`Level`](core::Level).
//! It processes one transaction at a time:
//!
//! ```text
//! Idle --swipe/rewind--> Transitioning --complete/tick--> Settled --> Idle
//!                                                            \--(rewind step)--> Transitioning
//! ```
//!
//! While a transition is pending every further swipe or rewind request is a
//! [`NoOpReason::Busy`] no-op. The level itself changes only when the
//! transition settles.
//!
//! # Example
//!
//! ```
//! use fold_puzzle_core::{BlockSpec, Level, WinningParams};
//! use fold_puzzle_engine::{EngineConfig, LevelController, SwipeOutcome};
//! use fold_puzzle_types::{BlockId, Direction};
//!
//! let level = Level::new([
//!     BlockSpec::at(0, 0).winning(WinningParams::with_layers([2])),
//!     BlockSpec::at(1, 0),
//!     BlockSpec::at(2, 0),
//! ])
//! .unwrap();
//! let mut ctl = LevelController::new(level, EngineConfig::default());
//!
//! let SwipeOutcome::Fold(t) = ctl.begin_swipe(BlockId(2), Direction::Left) else {
//!     panic!("expected a fold");
//! };
//! assert!(ctl.is_busy());
//!
//! // The animation collaborator reports completion.
//! let settled = ctl.complete(t.token).unwrap();
//! assert!(!ctl.is_busy());
//! assert_eq!(ctl.level().block(BlockId(1)).layer(), 1);
//! assert!(!settled.level_completed);
//! ```

pub mod config;
pub mod controller;
pub mod rewind;
pub mod transition;

pub use fold_puzzle_core as core;
pub use fold_puzzle_types as types;

pub use config::{CompletionMode, EngineConfig};
pub use controller::{
    Applied, CompletionError, EnginePhase, LevelController, NoOpReason, Settlement,
    SwipeDecision, SwipeOutcome, SwipeReport,
};
pub use rewind::RewindOutcome;
pub use transition::{Transition, TransitionKind, TransitionSource, TransitionToken};
