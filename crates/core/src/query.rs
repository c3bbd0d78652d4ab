//! Adjacency and eligibility queries
//!
//! Pure lookups over a [`Level`]. They decide whether a swipe can fold, unfold
//! or do nothing, but never mutate anything.

use arrayvec::ArrayVec;

use crate::level::Level;
use crate::types::{BlockId, Direction, GridPos};

impl Level {
    /// The stack the block would fold onto when swiped in `direction`.
    ///
    /// Only the immediately adjacent cell is considered; a stack two cells
    /// away is never a target, even if the cell in between is empty.
    pub fn find_fold_target(&self, block: BlockId, direction: Direction) -> Option<BlockId> {
        let cell = self.block(block).position().step(direction);
        self.root_at(cell)
    }

    /// Occupied orthogonal neighbor cells, in [`Direction::PRIORITY`] order.
    pub fn live_neighbors(&self, block: BlockId) -> ArrayVec<GridPos, 4> {
        self.block(block)
            .position()
            .neighbors()
            .into_iter()
            .filter(|&cell| self.is_occupied(cell))
            .collect()
    }

    pub fn count_live_neighbors(&self, block: BlockId) -> usize {
        self.live_neighbors(block).len()
    }

    /// Fold gate: the swiped block may have at most one occupied neighbor.
    pub fn has_at_most_one_neighbor(&self, block: BlockId) -> bool {
        self.count_live_neighbors(block) <= 1
    }

    /// The child of `block` that a swipe in `direction` would unfold.
    ///
    /// Only the most recently folded child is eligible, and only when its own
    /// cell lies one step from `block` in `direction`.
    pub fn find_unfold_candidate(&self, block: BlockId, direction: Direction) -> Option<BlockId> {
        let parent = self.block(block);
        let last = parent.last_child()?;
        let expected = parent.position().step(direction);
        (self.block(last).initial_position() == expected).then_some(last)
    }

    /// Next unfold of a full rewind: the top of `parent`'s stack together
    /// with the direction it unfolds in, searched in priority order.
    pub fn find_rewind_candidate(&self, parent: BlockId) -> Option<(BlockId, Direction)> {
        Direction::PRIORITY
            .into_iter()
            .find_map(|d| self.find_unfold_candidate(parent, d).map(|c| (c, d)))
    }

    /// Whether a swipe on `block` in `direction` would fold it.
    pub fn can_fold(&self, block: BlockId, direction: Direction) -> bool {
        self.find_fold_target(block, direction).is_some() && self.has_at_most_one_neighbor(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row3() -> Level {
        Level::from_cells([(0, 0), (1, 0), (2, 0)]).unwrap()
    }

    #[test]
    fn fold_target_uses_direction_offsets() {
        let level = Level::from_cells([(0, 0), (1, 0), (0, 1), (0, -1), (-1, 0)]).unwrap();
        let center = BlockId(0);
        assert_eq!(level.find_fold_target(center, Direction::Right), Some(BlockId(1)));
        assert_eq!(level.find_fold_target(center, Direction::Up), Some(BlockId(2)));
        assert_eq!(level.find_fold_target(center, Direction::Down), Some(BlockId(3)));
        assert_eq!(level.find_fold_target(center, Direction::Left), Some(BlockId(4)));
    }

    #[test]
    fn fold_target_missing_at_edge() {
        let level = row3();
        assert_eq!(level.find_fold_target(BlockId(0), Direction::Left), None);
        assert_eq!(level.find_fold_target(BlockId(2), Direction::Up), None);
    }

    #[test]
    fn neighbor_counts() {
        let level = row3();
        assert_eq!(level.count_live_neighbors(BlockId(0)), 1);
        assert_eq!(level.count_live_neighbors(BlockId(1)), 2);
        assert!(level.has_at_most_one_neighbor(BlockId(2)));
        assert!(!level.has_at_most_one_neighbor(BlockId(1)));
        assert!(!level.can_fold(BlockId(1), Direction::Left));
        assert!(level.can_fold(BlockId(0), Direction::Right));
    }

    #[test]
    fn isolated_block_has_no_neighbors() {
        let level = Level::from_cells([(0, 0), (5, 5)]).unwrap();
        assert_eq!(level.count_live_neighbors(BlockId(0)), 0);
        assert!(level.has_at_most_one_neighbor(BlockId(0)));
        assert!(!level.can_fold(BlockId(0), Direction::Right));
    }

    #[test]
    fn unfold_candidate_requires_children() {
        let level = row3();
        for d in Direction::PRIORITY {
            assert_eq!(level.find_unfold_candidate(BlockId(0), d), None);
        }
        assert_eq!(level.find_rewind_candidate(BlockId(0)), None);
    }
}
