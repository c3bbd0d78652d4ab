//! Fold/unfold scenarios through the public API.

use fold_puzzle::core::{BlockSpec, Level, WinningParams};
use fold_puzzle::engine::{
    EngineConfig, LevelController, NoOpReason, SwipeDecision, SwipeOutcome,
};
use fold_puzzle::types::{BlockId, Direction, GridPos};

fn never_won(cells: &[(i32, i32)]) -> Level {
    let mut level = Level::from_cells(cells.iter().copied()).unwrap();
    level.set_winning_params(BlockId(0), WinningParams::with_layers([u32::MAX]));
    level
}

#[test]
fn row_of_three_uses_cell_adjacency_only() {
    let mut level = Level::from_cells([(0, 0), (1, 0), (2, 0)]).unwrap();
    let (a, b, c) = (BlockId(0), BlockId(1), BlockId(2));

    level.commit_fold(b, a);
    assert_eq!(level.block(a).layer(), 1);
    assert_eq!(level.block(b).layer(), 0);
    assert_eq!(level.block(b).parent(), Some(a));

    // (2,0)'s left cell is now empty; the stack at (0,0) is two cells away.
    assert_eq!(level.find_fold_target(c, Direction::Left), None);
    assert_eq!(level.count_live_neighbors(c), 0);
    level.validate().unwrap();
}

#[test]
fn middle_of_a_row_cannot_fold() {
    let mut ctl = LevelController::new(never_won(&[(0, 0), (1, 0), (2, 0)]), EngineConfig::default());
    for dir in Direction::PRIORITY {
        let r = ctl.process_swipe_at(GridPos::new(1, 0), dir);
        assert_eq!(r.decision, SwipeDecision::NoOp, "{:?}", dir);
    }
    assert!(ctl.level().rewind_stack().is_empty());
}

#[test]
fn crowded_block_falls_through_to_unfold() {
    // C folds onto B. B still touches A and D, so a swipe on B can only unfold.
    let mut ctl = LevelController::new(never_won(&[(0, 0), (1, 0), (2, 0), (1, 1)]), EngineConfig::default());
    let r = ctl.process_swipe_at(GridPos::new(2, 0), Direction::Left);
    assert_eq!(r.decision, SwipeDecision::Fold);

    assert_eq!(ctl.level().count_live_neighbors(BlockId(1)), 2);
    let r = ctl.process_swipe_at(GridPos::new(1, 0), Direction::Right);
    assert_eq!(r.decision, SwipeDecision::Unfold);
    assert_eq!(ctl.level().block(BlockId(2)).position(), GridPos::new(2, 0));
    ctl.level().validate().unwrap();
}

#[test]
fn unfold_is_lifo_per_parent() {
    let mut level = Level::from_cells([(0, 0), (1, 0), (0, 1), (-1, 0)]).unwrap();
    let p = BlockId(0);
    level.commit_fold(BlockId(1), p);
    level.commit_fold(BlockId(2), p);
    level.commit_fold(BlockId(3), p);

    assert_eq!(level.find_unfold_candidate(p, Direction::Right), None);
    assert_eq!(level.find_unfold_candidate(p, Direction::Up), None);
    assert_eq!(level.find_unfold_candidate(p, Direction::Left), Some(BlockId(3)));

    level.commit_unfold(p, BlockId(3));
    assert_eq!(level.find_unfold_candidate(p, Direction::Up), Some(BlockId(2)));
    assert_eq!(level.find_unfold_candidate(p, Direction::Right), None);
    level.validate().unwrap();
}

#[test]
fn win_on_layer_ignores_position() {
    let level = Level::new([
        BlockSpec::at(0, 0).winning(WinningParams::with_layers([2])),
        BlockSpec::at(1, 0),
        BlockSpec::at(2, 0),
    ])
    .unwrap();
    let mut ctl = LevelController::new(level, EngineConfig::default());

    let r = ctl.process_swipe_at(GridPos::new(2, 0), Direction::Left);
    assert!(!r.settlement.unwrap().level_completed);
    assert!(!ctl.is_level_won());

    let r = ctl.process_swipe_at(GridPos::new(1, 0), Direction::Left);
    assert!(r.settlement.unwrap().level_completed);
    assert_eq!(ctl.level().block(BlockId(0)).layer(), 2);
    assert!(ctl.is_level_won());

    let r = ctl.process_swipe_at(GridPos::new(0, 0), Direction::Right);
    assert_eq!(r.reason, Some(NoOpReason::LevelCompleted));
}

#[test]
fn position_constraint_is_checked_on_current_cell() {
    let level = Level::new([
        BlockSpec::at(0, 0),
        BlockSpec::at(1, 0).winning(WinningParams::with_positions([GridPos::new(0, 0)])),
    ])
    .unwrap();
    assert!(!level.is_won());

    let mut ctl = LevelController::new(level, EngineConfig::default());
    let r = ctl.process_swipe(BlockId(1), Direction::Left);
    assert!(r.settlement.unwrap().level_completed);
}

#[test]
fn swipe_transition_reports_moving_stack() {
    let mut ctl = LevelController::new(never_won(&[(0, 0), (1, 0), (2, 0)]), EngineConfig::default());
    ctl.process_swipe(BlockId(2), Direction::Left);

    let SwipeOutcome::Fold(t) = ctl.begin_swipe(BlockId(1), Direction::Left) else {
        panic!("expected fold");
    };
    assert_eq!(t.moving, vec![BlockId(1), BlockId(2)]);
    assert_eq!(t.lift, 2);
    assert!((t.lift_height() - 0.1).abs() < 1e-6);
    assert_eq!(t.direction, Direction::Left);
}

#[test]
fn full_rewind_restores_the_start() {
    let mut ctl = LevelController::new(never_won(&[(0, 0), (1, 0), (2, 0), (1, 1)]), EngineConfig::default());
    ctl.process_swipe_at(GridPos::new(1, 1), Direction::Down);
    ctl.process_swipe_at(GridPos::new(2, 0), Direction::Left);
    ctl.process_swipe_at(GridPos::new(0, 0), Direction::Right);
    assert_eq!(ctl.level().rewind_stack().len(), 3);

    assert_eq!(ctl.run_full_rewind(), 3);
    assert!(ctl.level().rewind_stack().is_empty());
    assert!(!ctl.is_rewinding());
    for b in ctl.level().blocks() {
        assert_eq!(b.position(), b.initial_position());
        assert_eq!(b.layer(), 0);
        assert!(b.collider_enabled());
    }
}
