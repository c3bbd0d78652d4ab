//! Property tests over random levels and random swipe sequences.

use std::collections::BTreeSet;

use proptest::prelude::*;

use fold_puzzle::core::{Level, WinningParams};
use fold_puzzle::engine::{EngineConfig, LevelController, SwipeDecision};
use fold_puzzle::types::{BlockId, Direction, GridPos};

fn level_from(cells: &BTreeSet<(i32, i32)>) -> Level {
    let mut level = Level::from_cells(cells.iter().copied()).unwrap();
    // Never satisfiable, so the controller keeps accepting swipes.
    level.set_winning_params(BlockId(0), WinningParams::with_layers([u32::MAX]));
    level
}

fn play(ctl: &mut LevelController, swipes: &[(i32, i32, usize)]) -> usize {
    let mut applied = 0;
    for &(x, z, d) in swipes {
        let pos = GridPos::new(x, z);
        let neighbors = ctl
            .level()
            .root_at(pos)
            .map(|root| ctl.level().count_live_neighbors(root));
        let r = ctl.process_swipe_at(pos, Direction::PRIORITY[d]);
        if r.decision == SwipeDecision::Fold {
            let n = neighbors.expect("fold started from an empty cell");
            assert!(n <= 1, "fold from {:?} with {} live neighbors", pos, n);
        }
        if r.decision != SwipeDecision::NoOp {
            applied += 1;
        }
        ctl.level().validate().unwrap();
    }
    applied
}

fn cells() -> impl Strategy<Value = BTreeSet<(i32, i32)>> {
    prop::collection::btree_set((0..4i32, 0..4i32), 2..10)
}

fn swipes() -> impl Strategy<Value = Vec<(i32, i32, usize)>> {
    prop::collection::vec((0..4i32, 0..4i32, 0..4usize), 0..40)
}

proptest! {
    #[test]
    fn random_play_keeps_stacks_consistent(cells in cells(), swipes in swipes()) {
        let mut ctl = LevelController::new(level_from(&cells), EngineConfig::default());
        play(&mut ctl, &swipes);

        let level = ctl.level();
        let folded = level.blocks().iter().filter(|b| !b.is_root()).count();
        prop_assert_eq!(level.rewind_stack().len(), folded);
        let total: u32 = level
            .blocks()
            .iter()
            .filter(|b| b.is_root())
            .map(|b| level.descendant_count(b.id()) + 1)
            .sum();
        prop_assert_eq!(total as usize, level.len());
    }

    #[test]
    fn leaf_fold_then_unfold_is_identity(cells in cells(), swipes in swipes()) {
        let mut ctl = LevelController::new(level_from(&cells), EngineConfig::default());
        play(&mut ctl, &swipes);
        let mut level = ctl.into_level();

        let candidates: Vec<(BlockId, BlockId, Direction)> = level
            .blocks()
            .iter()
            .filter(|b| b.is_root() && b.child_count() == 0)
            .flat_map(|b| Direction::PRIORITY.into_iter().map(move |d| (b.id(), d)))
            .filter_map(|(id, d)| level.find_fold_target(id, d).map(|t| (id, t, d)))
            .collect();

        for (block, target, direction) in candidates {
            let before = level.snapshot();
            level.commit_fold(block, target);
            prop_assert_eq!(level.block(block).layer(), 0);
            prop_assert_eq!(
                level.find_unfold_candidate(target, direction.opposite()),
                Some(block)
            );
            level.commit_unfold(target, block);
            prop_assert_eq!(level.snapshot(), before);
        }
    }

    #[test]
    fn full_rewind_drains_everything(cells in cells(), swipes in swipes()) {
        let mut ctl = LevelController::new(level_from(&cells), EngineConfig::default());
        play(&mut ctl, &swipes);
        let folds = ctl.level().rewind_stack().len();

        prop_assert_eq!(ctl.run_full_rewind(), folds);
        prop_assert!(ctl.level().rewind_stack().is_empty());
        prop_assert!(!ctl.is_busy());
        for b in ctl.level().blocks() {
            prop_assert_eq!(b.position(), b.initial_position());
            prop_assert_eq!(b.layer(), 0);
            prop_assert!(b.is_root());
        }
    }
}
