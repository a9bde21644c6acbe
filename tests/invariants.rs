//! Randomised games checking the engine's structural invariants.

use proptest::prelude::*;

use go_tutor::board::{Color, Point};
use go_tutor::position::GameState;
use go_tutor::rules::{GameMode, RuleSet};

/// Play up to `picks.len()` moves, each chosen from the legal moves by index.
/// A pick of `None` passes. Calls `check` with every (before, after, captured).
fn random_game(
    size: usize,
    mode: GameMode,
    picks: &[Option<usize>],
    mut check: impl FnMut(&GameState, &GameState, &[Point]),
) {
    let rules = RuleSet::new(size, mode).unwrap();
    let mut state = GameState::new(rules);
    for pick in picks {
        if state.is_over() {
            break;
        }
        let legal = state.legal_moves(state.to_play());
        match pick {
            Some(i) if !legal.is_empty() => {
                let p = legal[i % legal.len()];
                let outcome = state.play(p).unwrap();
                check(&state, &outcome.state, &outcome.captured);
                state = outcome.state;
            }
            _ => {
                let next = state.pass().unwrap();
                check(&state, &next, &[]);
                state = next;
            }
        }
    }
}

fn picks() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(prop::option::weighted(0.95, 0usize..400), 0..120)
}

proptest! {
    #[test]
    fn every_group_keeps_a_liberty(size in 3usize..=9, picks in picks()) {
        random_game(size, GameMode::Standard, &picks, |_, after, _| {
            for g in after.board().all_groups() {
                assert!(!g.liberties.is_empty(), "group at {:?} has no liberties", g.anchor());
            }
        });
    }

    #[test]
    fn stone_count_accounts_for_captures(size in 3usize..=9, picks in picks()) {
        random_game(size, GameMode::Standard, &picks, |before, after, captured| {
            let placed = usize::from(after.last_move().is_some());
            assert_eq!(
                after.board().stone_count() + captured.len(),
                before.board().stone_count() + placed
            );
            for &p in captured {
                assert_eq!(after.board().get(p), None);
                assert_eq!(before.board().get(p), Some(before.to_play().opposite()));
            }
            let mover = before.to_play();
            assert_eq!(
                after.captures().get(mover),
                before.captures().get(mover) + captured.len() as u32
            );
        });
    }

    #[test]
    fn no_immediate_repetition(size in 3usize..=7, picks in picks()) {
        random_game(size, GameMode::Standard, &picks, |before, after, _| {
            if after.last_move().is_some() {
                if let Some(prev) = before.previous_snapshot() {
                    assert!(!after.board().matches(prev));
                }
            }
        });
    }

    #[test]
    fn turn_alternates_and_moves_count(size in 3usize..=9, picks in picks()) {
        random_game(size, GameMode::Standard, &picks, |before, after, _| {
            assert_eq!(after.to_play(), before.to_play().opposite());
            assert_eq!(after.move_number(), before.move_number() + 1);
        });
    }

    #[test]
    fn group_queries_agree(size in 3usize..=9, picks in picks()) {
        random_game(size, GameMode::Standard, &picks, |_, after, _| {
            let board = after.board();
            for (p, color) in board.stones() {
                let group = board.group(p);
                assert!(group.contains(&p));
                for &s in &group {
                    assert_eq!(board.get(s), Some(color));
                    assert_eq!(board.liberties(s), board.liberties(p));
                }
                for l in board.liberties(p) {
                    assert_eq!(board.get(l), None);
                }
            }
        });
    }

    #[test]
    fn capture_go_ends_on_first_capture(size in 3usize..=7, picks in picks()) {
        random_game(size, GameMode::FirstCapture, &picks, |before, after, captured| {
            assert_eq!(after.is_over(), !captured.is_empty());
            if !captured.is_empty() {
                assert_eq!(after.winner(), Some(before.to_play()));
                let loser = before.to_play().opposite();
                assert!(after.legal_moves(loser).is_empty());
            }
        });
    }

    #[test]
    fn most_captures_ends_exactly_when_blocked(size in 3usize..=4, picks in picks()) {
        random_game(size, GameMode::MostCaptures, &picks, |_, after, _| {
            if after.last_move().is_some() && !after.is_over() {
                assert!(after.has_legal_move(after.to_play()));
            }
            if after.is_over() {
                let tied = after.captures().get(Color::Black) == after.captures().get(Color::White);
                assert_eq!(after.winner().is_none(), tied);
            }
        });
    }
}

#[test]
fn empty_board_allows_every_point() {
    for size in 3..=19 {
        let state = GameState::new(RuleSet::new(size, GameMode::Standard).unwrap());
        assert_eq!(state.legal_moves(Color::Black).len(), size * size);
    }
}
