//! Alpha-beta pruning must be a pure optimization: identical move choice on
//! every reachable position, never more nodes than plain minimax.

use std::collections::HashSet;

use gambit::{
    Game, Outcome, Player,
    search::{MinimaxPolicy, NeutralEvaluator},
    tictactoe::BoardState,
};

fn reachable_positions() -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut stack = vec![BoardState::new()];
    let mut positions = Vec::new();

    while let Some(state) = stack.pop() {
        if !seen.insert(state.encode()) {
            continue;
        }
        if state.is_terminal() {
            continue;
        }
        positions.push(state);
        for mv in state.legal_moves() {
            stack.push(state.make_move(mv).unwrap());
        }
    }

    positions
}

#[test]
fn pruning_preserves_choice_on_every_reachable_position() {
    let mut plain = MinimaxPolicy::new(NeutralEvaluator, None, false);
    let mut pruned = MinimaxPolicy::new(NeutralEvaluator, None, true);

    let positions = reachable_positions();
    // 4520 non-terminal positions are reachable from the empty board
    assert_eq!(positions.len(), 4520);

    for state in &positions {
        let (mv_plain, stats_plain) = plain.choose_move(state).unwrap();
        let (mv_pruned, stats_pruned) = pruned.choose_move(state).unwrap();

        assert_eq!(
            mv_plain, mv_pruned,
            "move choice diverged in position:\n{state}"
        );
        assert!(
            stats_pruned.nodes_visited <= stats_plain.nodes_visited,
            "pruning expanded more nodes in position:\n{state}"
        );
    }
}

#[test]
fn optimal_self_play_draws() {
    let mut x_policy = MinimaxPolicy::new(NeutralEvaluator, None, true);
    let mut o_policy = MinimaxPolicy::new(NeutralEvaluator, None, true);

    let mut state = BoardState::new();
    while !state.is_terminal() {
        let (mv, _) = if state.to_move() == Player::X {
            x_policy.choose_move(&state).unwrap()
        } else {
            o_policy.choose_move(&state).unwrap()
        };
        state = state.make_move(mv).unwrap();
    }

    assert_eq!(state.outcome(), Outcome::Draw);
}

#[test]
fn search_is_deterministic() {
    let state = BoardState::from_string("X...O....").unwrap();
    let mut policy = MinimaxPolicy::new(NeutralEvaluator, None, true);

    let (first, first_stats) = policy.choose_move(&state).unwrap();
    let (second, second_stats) = policy.choose_move(&state).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_stats, second_stats);
}
