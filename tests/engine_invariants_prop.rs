//! Property tests for the simulation engine.
//!
//! Random seeds and random command streams; after every step:
//! - board cells hold 0 or a shape id
//! - the active piece lies fully in bounds and on empty cells
//! - score and line totals never decrease, and score moves only in table steps
//! - once over, nothing but reset changes the state
//! - every 7 draws from a fresh bag are a permutation of the kinds
use proptest::prelude::*;

use blockfall::core::{GameState, RandomBag};
use blockfall::types::{GameAction, LINE_SCORES};

fn action_strategy() -> impl Strategy<Value = Option<GameAction>> {
    prop_oneof![
        3 => Just(None),
        1 => Just(Some(GameAction::MoveLeft)),
        1 => Just(Some(GameAction::MoveRight)),
        2 => Just(Some(GameAction::SoftDrop)),
        1 => Just(Some(GameAction::RotateCw)),
        1 => Just(Some(GameAction::RotateCcw)),
    ]
}

fn assert_consistent(g: &GameState) {
    let snap = g.snapshot();
    assert!(snap.board.iter().flatten().all(|&v| v <= 7));

    if let Some(active) = g.active() {
        assert!(active.fits(g.board()), "active overlaps: {:?}", active);
        let ghost = g.ghost_y().unwrap();
        assert!(ghost >= active.y);
    } else {
        assert!(g.game_over());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_invariants_hold_over_rollouts(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 200..1500),
    ) {
        let mut g = GameState::new(seed);
        assert_consistent(&g);

        for action in actions {
            let (score, lines) = (g.score(), g.lines());

            if let Some(action) = action {
                g.apply_action(action);
            }
            g.tick();
            assert_consistent(&g);

            prop_assert!(g.lines() >= lines);
            let gained = g.score() - score;
            prop_assert!(LINE_SCORES.contains(&gained), "unexpected gain {}", gained);
            prop_assert!(g.lines() - lines <= 4);

            if let Some(ev) = g.take_last_event() {
                prop_assert_eq!(ev.points, gained);
                prop_assert_eq!(ev.lines_cleared, g.lines() - lines);
                prop_assert_eq!(ev.topped_out, g.game_over());
            }
        }
    }

    #[test]
    fn game_over_is_absorbing(seed in any::<u64>(), extra in prop::collection::vec(action_strategy(), 1..50)) {
        let mut g = GameState::new(seed);
        let mut guard = 0;
        while !g.game_over() {
            g.tick();
            guard += 1;
            prop_assert!(guard < 100_000);
        }

        let frozen = g.snapshot();
        for action in extra.into_iter().flatten() {
            prop_assert!(!g.apply_action(action));
            prop_assert!(!g.tick());
        }
        prop_assert_eq!(g.snapshot(), frozen);
    }

    #[test]
    fn every_bag_is_a_permutation(seed in any::<u64>(), bags in 1usize..20) {
        let mut bag = RandomBag::new(seed);
        for _ in 0..bags {
            let mut seen = [false; 8];
            for _ in 0..7 {
                let id = bag.next().id() as usize;
                prop_assert!(!seen[id], "duplicate id {} within one bag", id);
                seen[id] = true;
            }
        }
    }

    #[test]
    fn pause_never_changes_engine_state(seed in any::<u64>()) {
        let mut g = GameState::new(seed);
        let before = g.snapshot();
        prop_assert!(!g.apply_action(GameAction::Pause));
        prop_assert_eq!(g.snapshot(), before);
    }
}
