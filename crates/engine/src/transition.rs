//! Pending transitions handed to the animation collaborator.

use crate::types::{BlockId, Direction, FOLD_LIFT_PER_BLOCK};

/// Identifies one transition; completion must present the matching token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Fold { block: BlockId, target: BlockId },
    Unfold { parent: BlockId, child: BlockId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSource {
    Swipe,
    Rewind,
}

/// A fold or unfold waiting for its animation to finish.
///
/// Nothing in the level has changed yet; the mutation runs when the
/// transition settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub token: TransitionToken,
    pub kind: TransitionKind,
    pub source: TransitionSource,
    pub direction: Direction,
    /// The moving block followed by everything stacked on it.
    pub moving: Vec<BlockId>,
    /// Blocks involved in a fold; drives the lift height. Zero for unfolds.
    pub lift: u32,
    pub rotation_ms: u32,
    /// Slide back to the home cell after the flip (unfolds only).
    pub settle_ms: u32,
}

impl Transition {
    pub fn duration_ms(&self) -> u32 {
        self.rotation_ms + self.settle_ms
    }

    pub fn lift_height(&self) -> f32 {
        self.lift as f32 * FOLD_LIFT_PER_BLOCK
    }

    pub fn is_fold(&self) -> bool {
        matches!(self.kind, TransitionKind::Fold { .. })
    }

    /// The block that flips.
    pub fn mover(&self) -> BlockId {
        match self.kind {
            TransitionKind::Fold { block, .. } => block,
            TransitionKind::Unfold { child, .. } => child,
        }
    }
}
