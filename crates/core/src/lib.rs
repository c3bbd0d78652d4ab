//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate holds the block hierarchy and every rule that mutates it.
//! It has no notion of time, animation or input; the engine crate sequences
//! transitions on top of it.
//!
//! - **Deterministic**: the same swipes on the same level always give the same state
//! - **Arena-based**: blocks are addressed by [`BlockId`](types::BlockId); parent/child
//!   links are ids, never references
//! - **Checked**: [`Level::validate`] verifies the whole hierarchy, and commits
//!   panic on corrupted state
//!
//! # Module Structure
//!
//! - [`block`]: the per-cell state container
//! - [`level`]: block arena, rewind stack, construction and invariant checks
//! - [`query`]: fold target, neighbor gate and unfold candidate lookups
//! - [`layers`]: fold/unfold commits and layer recomputation
//! - [`win`]: per-block winning constraints and level evaluation
//! - [`snapshot`]: owned copies of level state for observers
//!
//! # Rules
//!
//! - **Fold**: a swiped block folds onto the stack in the adjacent cell, but only
//!   when it has at most one occupied neighbor
//! - **Unfold**: a swipe on a stack peels its most recently folded child back to
//!   that child's own cell, if the child came from the swiped direction
//! - **Layer**: number of blocks above a block in its stack
//!
//! # Example
//!
//! ```
//! use fold_puzzle_core::Level;
//! use fold_puzzle_core::types::{BlockId, Direction};
//!
//! let mut level = Level::from_cells([(0, 0), (1, 0), (2, 0)]).unwrap();
//!
//! // (1,0) has two neighbors, so it cannot fold.
//! assert!(!level.can_fold(BlockId(1), Direction::Left));
//!
//! // (2,0) folds left onto (1,0).
//! let target = level.find_fold_target(BlockId(2), Direction::Left).unwrap();
//! level.commit_fold(BlockId(2), target);
//! assert_eq!(level.block(BlockId(1)).layer(), 1);
//!
//! // Swiping right on (1,0) peels it back off.
//! let child = level.find_unfold_candidate(BlockId(1), Direction::Right).unwrap();
//! level.commit_unfold(BlockId(1), child);
//! assert_eq!(level.block(BlockId(1)).layer(), 0);
//! ```

pub mod block;
pub mod layers;
pub mod level;
pub mod query;
pub mod snapshot;
pub mod win;

pub use fold_puzzle_types as types;

// Re-export commonly used types for convenience
pub use block::Block;
pub use layers::{FoldRecord, UnfoldRecord};
pub use level::{BlockSpec, InvariantViolation, Level, LevelError};
pub use snapshot::{BlockSnapshot, LevelSnapshot};
pub use win::{is_level_won, WinningParams};
