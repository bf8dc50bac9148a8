//! Static position evaluation for depth-limited search

use crate::game::{Game, Player};

/// Static heuristic scoring of non-terminal positions.
///
/// Implementations must be zero-sum consistent:
/// `score(state, X) == -score(state, O)` for every position. Scores are only
/// consulted at the depth limit; terminal positions are valued by the search
/// itself at a magnitude no heuristic can reach.
pub trait Evaluator<G: Game>: Send {
    fn score(&self, state: &G, perspective: Player) -> f64;
}

/// Evaluator that scores every position as neutral.
///
/// Used where search is exhaustive and no heuristic is needed (Tic-Tac-Toe's
/// full tree is at most 9 plies).
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralEvaluator;

impl<G: Game> Evaluator<G> for NeutralEvaluator {
    fn score(&self, _state: &G, _perspective: Player) -> f64 {
        0.0
    }
}
