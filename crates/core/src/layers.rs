//! Fold/unfold commits and layer recomputation
//!
//! A block's layer is the number of blocks physically above it in its stack.
//! Folding flips the moving stack over onto the target, so:
//!
//! - the target gains `d + 1` blocks above it (`d` = descendants of the folded block)
//! - blocks already stacked on the target gain the same `d + 1`
//! - the folded block lands on top (`layer = 0`)
//! - the folded block's descendants are turned upside down (`layer = d - layer`)
//!
//! Unfolding is the inverse: the flip is its own inverse, so the detached
//! subtree is reflected again, and everything left behind loses `d + 1`.

use tracing::debug;

use crate::level::Level;
use crate::types::{BlockId, GridPos};

/// Result of a committed fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldRecord {
    pub block: BlockId,
    pub target: BlockId,
    /// Descendants carried along with `block`.
    pub carried: u32,
}

/// Result of a committed unfold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnfoldRecord {
    pub parent: BlockId,
    pub child: BlockId,
    pub carried: u32,
}

impl Level {
    /// Number of blocks that move in a fold of `block` onto `target`.
    pub fn fold_lift(&self, block: BlockId, target: BlockId) -> u32 {
        self.descendant_count(block) + self.descendant_count(target) + 1
    }

    /// Fold `block` onto `target` and settle the resulting state.
    ///
    /// The caller has already checked eligibility. Reparents, recomputes
    /// layers, moves the carried stack, disables the block's collider and
    /// records it on the rewind stack.
    pub fn commit_fold(&mut self, block: BlockId, target: BlockId) -> FoldRecord {
        assert!(
            !self.is_ancestor(block, target),
            "folding {} onto {} would create a cycle",
            block,
            target
        );
        debug_assert!(self.block(block).is_root(), "fold of non-root {}", block);

        let d = self.descendant_count(block);

        self.block_mut(block).set_parent(Some(target));
        self.block_mut(target).add_child(block);

        let t = self.block_mut(target);
        t.set_layer(t.layer() + d + 1);
        self.block_mut(block).set_layer(0);

        let siblings: Vec<BlockId> = self
            .block(target)
            .children()
            .iter()
            .copied()
            .filter(|&c| c != block)
            .collect();
        for s in siblings {
            self.raise_subtree(s, d + 1);
        }
        self.reflect_descendants(block, d);

        let pos = self.block(target).position();
        self.move_subtree(block, pos);

        self.block_mut(block).set_collider_enabled(false);
        self.rewind_stack_mut().push(block);

        debug!(%block, %target, carried = d, "fold committed");
        FoldRecord {
            block,
            target,
            carried: d,
        }
    }

    /// Detach `child` from `parent` and return it to its own cell.
    pub fn commit_unfold(&mut self, parent: BlockId, child: BlockId) -> UnfoldRecord {
        assert_eq!(
            self.block(child).parent(),
            Some(parent),
            "{} is not folded onto {}",
            child,
            parent
        );

        let d = self.descendant_count(child);

        self.block_mut(child).set_parent(None);
        self.block_mut(parent).remove_child(child);

        let p = self.block_mut(parent);
        let lowered = p
            .layer()
            .checked_sub(d + 1)
            .unwrap_or_else(|| panic!("layer underflow on {}", parent));
        p.set_layer(lowered);

        self.block_mut(child).set_layer(d);
        self.reflect_descendants(child, d);

        let siblings: Vec<BlockId> = self.block(parent).children().to_vec();
        for s in siblings {
            self.lower_subtree(s, d + 1);
        }

        let home = self.block(child).initial_position();
        self.move_subtree(child, home);

        self.block_mut(child).set_collider_enabled(true);

        let stack = self.rewind_stack_mut();
        let idx = stack
            .iter()
            .rposition(|&b| b == child)
            .unwrap_or_else(|| panic!("{} missing from rewind stack", child));
        stack.remove(idx);

        debug!(%parent, %child, carried = d, "unfold committed");
        UnfoldRecord {
            parent,
            child,
            carried: d,
        }
    }

    fn raise_subtree(&mut self, id: BlockId, by: u32) {
        for member in self.subtree(id) {
            let b = self.block_mut(member);
            b.set_layer(b.layer() + by);
        }
    }

    fn lower_subtree(&mut self, id: BlockId, by: u32) {
        for member in self.subtree(id) {
            let b = self.block_mut(member);
            let lowered = b
                .layer()
                .checked_sub(by)
                .unwrap_or_else(|| panic!("layer underflow on {}", member));
            b.set_layer(lowered);
        }
    }

    /// `layer = d - layer` for every descendant of `id` (not `id` itself).
    fn reflect_descendants(&mut self, id: BlockId, d: u32) {
        let descendants: Vec<BlockId> = self.subtree(id).into_iter().skip(1).collect();
        for member in descendants {
            let b = self.block_mut(member);
            let reflected = d
                .checked_sub(b.layer())
                .unwrap_or_else(|| panic!("layer {} above stack height on {}", b.layer(), member));
            b.set_layer(reflected);
        }
    }

    fn move_subtree(&mut self, id: BlockId, pos: GridPos) {
        for member in self.subtree(id) {
            self.block_mut(member).set_position(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn layers(level: &Level) -> Vec<u32> {
        level.blocks().iter().map(|b| b.layer()).collect()
    }

    #[test]
    fn fold_leaf_costs_one_layer() {
        let mut level = Level::from_cells([(0, 0), (1, 0)]).unwrap();
        let rec = level.commit_fold(BlockId(1), BlockId(0));
        assert_eq!(rec.carried, 0);
        assert_eq!(layers(&level), vec![1, 0]);
        assert_eq!(level.block(BlockId(1)).parent(), Some(BlockId(0)));
        assert_eq!(level.block(BlockId(1)).position(), GridPos::new(0, 0));
        assert!(!level.block(BlockId(1)).collider_enabled());
        assert_eq!(level.rewind_stack(), &[BlockId(1)]);
        level.validate().unwrap();
    }

    #[test]
    fn folding_a_stack_reflects_its_descendants() {
        // A(0,0) B(1,0) C(2,0): C onto B, then B (carrying C) onto A.
        let mut level = Level::from_cells([(0, 0), (1, 0), (2, 0)]).unwrap();
        level.commit_fold(BlockId(2), BlockId(1));
        assert_eq!(layers(&level), vec![0, 1, 0]);

        let rec = level.commit_fold(BlockId(1), BlockId(0));
        assert_eq!(rec.carried, 1);
        // A at the bottom, C flipped under B, B on top.
        assert_eq!(layers(&level), vec![2, 0, 1]);
        assert_eq!(level.block(BlockId(2)).position(), GridPos::new(0, 0));
        level.validate().unwrap();
    }

    #[test]
    fn folding_onto_an_existing_stack_raises_siblings() {
        // D(0,1) sits on A(0,0); then B (carrying C) folds onto A.
        let mut level = Level::from_cells([(0, 0), (1, 0), (2, 0), (0, 1)]).unwrap();
        level.commit_fold(BlockId(3), BlockId(0));
        level.commit_fold(BlockId(2), BlockId(1));
        level.commit_fold(BlockId(1), BlockId(0));
        assert_eq!(layers(&level), vec![3, 0, 1, 2]);
        level.validate().unwrap();
    }

    #[test]
    fn unfold_is_the_inverse_of_fold() {
        let mut level = Level::from_cells([(0, 0), (1, 0), (2, 0), (0, 1)]).unwrap();
        level.commit_fold(BlockId(3), BlockId(0));
        level.commit_fold(BlockId(2), BlockId(1));
        let before = layers(&level);

        level.commit_fold(BlockId(1), BlockId(0));
        let rec = level.commit_unfold(BlockId(0), BlockId(1));
        assert_eq!(rec.carried, 1);
        assert_eq!(layers(&level), before);
        assert_eq!(level.block(BlockId(1)).position(), GridPos::new(1, 0));
        assert_eq!(level.block(BlockId(2)).position(), GridPos::new(1, 0));
        assert!(level.block(BlockId(1)).collider_enabled());
        assert!(!level.block(BlockId(2)).collider_enabled());
        assert_eq!(level.rewind_stack(), &[BlockId(3), BlockId(2)]);
        level.validate().unwrap();
    }

    #[test]
    fn unfold_removes_by_value_not_tail() {
        let mut level = Level::from_cells([(0, 0), (1, 0), (5, 5), (6, 5)]).unwrap();
        level.commit_fold(BlockId(1), BlockId(0));
        level.commit_fold(BlockId(3), BlockId(2));
        level.commit_unfold(BlockId(0), BlockId(1));
        assert_eq!(level.rewind_stack(), &[BlockId(3)]);
        level.validate().unwrap();
    }

    #[test]
    fn fold_lift_counts_both_stacks() {
        let mut level = Level::from_cells([(0, 0), (1, 0), (2, 0), (0, 1)]).unwrap();
        level.commit_fold(BlockId(3), BlockId(0));
        level.commit_fold(BlockId(2), BlockId(1));
        assert_eq!(level.fold_lift(BlockId(1), BlockId(0)), 3);
        assert!(level.find_fold_target(BlockId(1), Direction::Left).is_some());
    }

    #[test]
    #[should_panic(expected = "cycle")]
    fn fold_into_own_descendant_panics() {
        let mut level = Level::from_cells([(0, 0), (1, 0)]).unwrap();
        level.commit_fold(BlockId(1), BlockId(0));
        level.commit_fold(BlockId(0), BlockId(1));
    }
}
