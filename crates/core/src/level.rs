//! Level - arena of blocks plus the rewind stack
//!
//! Blocks are addressed by [`BlockId`], which is their index in the arena.
//! Parent/child links are stored as ids, so the hierarchy is a forest over
//! the arena rather than a web of references.

use thiserror::Error;

use crate::block::Block;
use crate::types::{BlockId, GridPos};
use crate::win::{self, WinningParams};

/// Level construction input for one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSpec {
    pub position: GridPos,
    pub winning: WinningParams,
}

impl BlockSpec {
    pub fn at(x: i32, z: i32) -> Self {
        Self {
            position: GridPos::new(x, z),
            winning: WinningParams::unconstrained(),
        }
    }

    pub fn winning(mut self, winning: WinningParams) -> Self {
        self.winning = winning;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level has no blocks")]
    Empty,
    #[error("more than one block starts at ({}, {})", .0.x, .0.z)]
    DuplicatePosition(GridPos),
}

/// Broken hierarchy invariant reported by [`Level::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("block {0} is its own ancestor")]
    Cycle(BlockId),
    #[error("block {child} names {parent} as parent but is not in its child list")]
    ParentLinkBroken { parent: BlockId, child: BlockId },
    #[error("block {child} is listed under {parent} but has a different parent")]
    ChildLinkBroken { parent: BlockId, child: BlockId },
    #[error("root block {0} is away from its initial cell")]
    RootMoved(BlockId),
    #[error("block {0} is not at its root's position")]
    DetachedFromStack(BlockId),
    #[error("block {0} has the wrong collider state")]
    ColliderState(BlockId),
    #[error("stack rooted at {0} does not hold layers 0..=n")]
    LayerSet(BlockId),
    #[error("rewind stack does not match the set of folded blocks")]
    RewindStack,
}

/// A loaded level.
#[derive(Debug, Clone)]
pub struct Level {
    blocks: Vec<Block>,
    winning: Vec<WinningParams>,
    /// Every currently folded block, in fold order.
    rewind_stack: Vec<BlockId>,
}

impl Level {
    /// Build a level with every block unfolded on its own cell.
    pub fn new(specs: impl IntoIterator<Item = BlockSpec>) -> Result<Self, LevelError> {
        let mut blocks: Vec<Block> = Vec::new();
        let mut winning = Vec::new();

        for spec in specs {
            if blocks.iter().any(|b| b.initial_position() == spec.position) {
                return Err(LevelError::DuplicatePosition(spec.position));
            }
            let id = BlockId(blocks.len() as u32);
            blocks.push(Block::new(id, spec.position));
            winning.push(spec.winning);
        }

        if blocks.is_empty() {
            return Err(LevelError::Empty);
        }

        Ok(Self {
            blocks,
            winning,
            rewind_stack: Vec::new(),
        })
    }

    /// Unconstrained blocks at the given cells.
    pub fn from_cells(cells: impl IntoIterator<Item = (i32, i32)>) -> Result<Self, LevelError> {
        Self::new(cells.into_iter().map(|(x, z)| BlockSpec::at(x, z)))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.iter().map(|b| b.id())
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    /// Panics on an id from another level.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    pub fn winning_params(&self, id: BlockId) -> &WinningParams {
        &self.winning[id.index()]
    }

    pub fn set_winning_params(&mut self, id: BlockId, params: WinningParams) {
        self.winning[id.index()] = params;
    }

    pub fn rewind_stack(&self) -> &[BlockId] {
        &self.rewind_stack
    }

    pub(crate) fn rewind_stack_mut(&mut self) -> &mut Vec<BlockId> {
        &mut self.rewind_stack
    }

    /// The stack root currently occupying `pos`.
    ///
    /// A cell holds at most one root: roots rest on their own initial cell
    /// and every folded block shares its root's position.
    pub fn root_at(&self, pos: GridPos) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|b| b.is_root() && b.position() == pos)
            .map(|b| b.id())
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.blocks.iter().any(|b| b.position() == pos)
    }

    pub fn root_of(&self, id: BlockId) -> BlockId {
        let mut cur = id;
        let mut steps = 0usize;
        while let Some(parent) = self.block(cur).parent() {
            cur = parent;
            steps += 1;
            assert!(steps <= self.blocks.len(), "cycle through block {}", id);
        }
        cur
    }

    /// True if `ancestor` is `id` itself or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: BlockId, id: BlockId) -> bool {
        let mut cur = Some(id);
        let mut steps = 0usize;
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.blocks.len() {
                return false;
            }
            cur = self.block(c).parent();
        }
        false
    }

    /// Total number of blocks transitively folded onto `id`.
    pub fn descendant_count(&self, id: BlockId) -> u32 {
        self.block(id)
            .children()
            .iter()
            .map(|&c| 1 + self.descendant_count(c))
            .sum()
    }

    /// `id` and all its descendants, depth-first pre-order.
    pub fn subtree(&self, id: BlockId) -> Vec<BlockId> {
        let mut out = Vec::new();
        self.collect_subtree(id, &mut out);
        out
    }

    fn collect_subtree(&self, id: BlockId, out: &mut Vec<BlockId>) {
        out.push(id);
        for &c in self.block(id).children() {
            self.collect_subtree(c, out);
        }
    }

    pub fn is_won(&self) -> bool {
        win::is_level_won(self)
    }

    /// Full structural check of the hierarchy, layers and rewind stack.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for b in &self.blocks {
            if !self.is_acyclic_from(b.id()) {
                return Err(InvariantViolation::Cycle(b.id()));
            }
            if let Some(p) = b.parent() {
                let listed = self.block(p).children().iter().filter(|&&c| c == b.id()).count();
                if listed != 1 {
                    return Err(InvariantViolation::ParentLinkBroken {
                        parent: p,
                        child: b.id(),
                    });
                }
            }
            for &c in b.children() {
                if self.block(c).parent() != Some(b.id()) {
                    return Err(InvariantViolation::ChildLinkBroken {
                        parent: b.id(),
                        child: c,
                    });
                }
            }
        }

        for b in &self.blocks {
            if b.collider_enabled() != b.is_root() {
                return Err(InvariantViolation::ColliderState(b.id()));
            }
            if b.is_root() {
                if b.position() != b.initial_position() {
                    return Err(InvariantViolation::RootMoved(b.id()));
                }
                let members = self.subtree(b.id());
                let mut layers: Vec<u32> = members.iter().map(|&m| self.block(m).layer()).collect();
                layers.sort_unstable();
                if layers.iter().enumerate().any(|(i, &l)| l != i as u32) {
                    return Err(InvariantViolation::LayerSet(b.id()));
                }
            } else if b.position() != self.block(self.root_of(b.id())).position() {
                return Err(InvariantViolation::DetachedFromStack(b.id()));
            }
        }

        let folded = self.blocks.iter().filter(|b| !b.is_root()).count();
        let mut seen = std::collections::BTreeSet::new();
        let stack_ok = self.rewind_stack.len() == folded
            && self
                .rewind_stack
                .iter()
                .all(|&id| seen.insert(id) && !self.block(id).is_root());
        if !stack_ok {
            return Err(InvariantViolation::RewindStack);
        }

        Ok(())
    }

    fn is_acyclic_from(&self, id: BlockId) -> bool {
        let mut cur = self.block(id).parent();
        let mut steps = 0usize;
        while let Some(c) = cur {
            if c == id || steps > self.blocks.len() {
                return false;
            }
            steps += 1;
            cur = self.block(c).parent();
        }
        true
    }
}
